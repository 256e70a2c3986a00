use cgmath::Vector3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb {
    inner: Vector3<u8>,
}

macro_rules! parse_color {
    ($line:expr) => {{
        let trimmed = $line.trim();
        let comment = trimmed.find("//");

        if let Some(c) = comment {
            trimmed[0..c].trim()
        } else {
            trimmed
        }
    }}
}

impl Rgb {
    pub fn r(&self) -> u8 {
        self.inner.x
    }

    pub fn g(&self) -> u8 {
        self.inner.y
    }

    pub fn b(&self) -> u8 {
        self.inner.z
    }

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            inner: Vector3::new(r, g ,b)
        }
    }

    /// Parses `r, g, b` with an optional trailing `//` comment,
    /// extra components (alpha) are ignored
    pub fn parse(line: &str) -> Option<Self> {
        let mut split = line.split(',');

        let r = parse_color!(split.next()?);
        let g = parse_color!(split.next()?);
        let b = parse_color!(split.next()?);

        Some(Self {
            inner: Vector3::new(
                r.parse().ok()?,
                g.parse().ok()?,
                b.parse().ok()?,
            )
        })
    }

    /// Components in `[0, 1]`
    pub fn to_normalized(&self) -> [f64; 3] {
        [
            self.r() as f64 / 255.0,
            self.g() as f64 / 255.0,
            self.b() as f64 / 255.0,
        ]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::new(255, 255, 255)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(value: [u8; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

#[test]
fn test_color_parse() {
    let s = "254, 255, 255";
    let parsed = Rgb::parse(s).unwrap();
    assert_eq!(parsed.r(), 254);
    assert_eq!(parsed.g(), 255);
    assert_eq!(parsed.b(), 255);

    let s = "254,  255,  10   ";
    let parsed = Rgb::parse(s).unwrap();
    assert_eq!(parsed.r(), 254);
    assert_eq!(parsed.g(), 255);
    assert_eq!(parsed.b(), 10);

    let s = "254,  255,      10   // comment";
    let parsed = Rgb::parse(s).unwrap();
    assert_eq!(parsed.b(), 10);
}

#[test]
fn test_color_parse_rejects_garbage() {
    assert_eq!(Rgb::parse("254, 255"), None);
    assert_eq!(Rgb::parse("254, 300, 1"), None);
    assert_eq!(Rgb::parse("a, b, c"), None);
}

#[test]
fn test_normalized() {
    assert_eq!(Rgb::new(255, 0, 51).to_normalized(), [1.0, 0.0, 0.2]);
}
