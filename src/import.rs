use std::{io, path::Path};

use cgmath::{InnerSpace, Vector2};
use rosu_map::{
    section::hit_objects::{hit_samples::SampleBank, HitObjectKind as RosuKind, SplineType},
    util::Pos,
    Beatmap,
};
use thiserror::Error;

use crate::{
    chart::{Chart, ChartError},
    curve::CurveKind,
    difficulty::Difficulty,
    hit_objects::{circle::Circle, slider::Slider, spinner::Spinner, HitObject},
    palette::ComboPalette,
    rgb::Rgb,
    timing::{SampleSet, TimingPoint},
};

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("reading beatmap: `{0}`")]
    Io(#[from] io::Error),
    #[error("invalid chart: `{0}`")]
    Chart(#[from] ChartError),
}

impl From<SplineType> for CurveKind {
    fn from(value: SplineType) -> Self {
        match value {
            SplineType::Catmull => Self::CatmullRom,
            SplineType::BSpline => Self::Bezier,
            SplineType::Linear => Self::Linear,
            SplineType::PerfectCurve => Self::PerfectCircle,
        }
    }
}

impl From<SampleBank> for SampleSet {
    fn from(value: SampleBank) -> Self {
        match value {
            SampleBank::None => Self::Auto,
            SampleBank::Normal => Self::Normal,
            SampleBank::Soft => Self::Soft,
            SampleBank::Drum => Self::Drum,
        }
    }
}

#[inline]
fn to_vec(pos: Pos) -> Vector2<f64> {
    Vector2::new(pos.x as f64, pos.y as f64)
}

pub fn from_path(path: impl AsRef<Path>) -> Result<Chart, ImportError> {
    let path = path.as_ref();
    let beatmap = Beatmap::from_path(path)?;
    let chart = Chart::from_rosu(&beatmap)?;

    tracing::info!(
        "Loaded {}: {} objects, {} timing points, CS {} OD {} AR {}",
        path.display(),
        chart.len(),
        chart.timing_points().len(),
        chart.difficulty().cs,
        chart.difficulty().od,
        chart.difficulty().ar,
    );

    Ok(chart)
}

pub fn from_bytes(bytes: &[u8]) -> Result<Chart, ImportError> {
    let beatmap = Beatmap::from_bytes(bytes)?;
    Ok(Chart::from_rosu(&beatmap)?)
}

impl Chart {
    /// Per object hit sounds are not carried over
    pub fn from_rosu(beatmap: &Beatmap) -> Result<Self, ChartError> {
        let mut objects = Vec::with_capacity(beatmap.hit_objects.len());
        let mut combo_index = 0;

        for obj in &beatmap.hit_objects {
            let new_combo = match &obj.kind {
                RosuKind::Circle(circle) => Some((circle.new_combo, circle.combo_offset.max(0) as usize)),
                RosuKind::Slider(slider) => Some((slider.new_combo, slider.combo_offset.max(0) as usize)),
                _ => None,
            };

            if let Some((true, offset)) = new_combo {
                if !objects.is_empty() {
                    combo_index += 1 + offset;
                }
            }

            let object = match &obj.kind {
                RosuKind::Circle(circle) => {
                    HitObject::circle(obj.start_time, Circle::new(to_vec(circle.pos), combo_index))
                }
                RosuKind::Slider(slider) => {
                    let pos = to_vec(slider.pos);
                    let control_points = slider.path.control_points();

                    let kind = control_points
                        .first()
                        .and_then(|point| point.path_type.as_ref())
                        .map_or(CurveKind::Bezier, |path_type| path_type.kind.into());

                    // Positions are relative to the head, which is the first point
                    let mut points = Vec::with_capacity(control_points.len());
                    for (i, point) in control_points.iter().enumerate().skip(1) {
                        let abs = pos + to_vec(point.pos);
                        points.push(abs);

                        // Typed points in the middle start a new segment
                        if kind == CurveKind::Bezier
                            && point.path_type.is_some()
                            && i + 1 < control_points.len()
                        {
                            points.push(abs);
                        }
                    }

                    let pixel_length = slider
                        .path
                        .expected_dist()
                        .unwrap_or_else(|| polygon_length(pos, &points));

                    let repeat_count = slider.span_count().max(1) as u32;

                    HitObject::slider(
                        obj.start_time,
                        Slider::new(pos, combo_index, kind, points, pixel_length, repeat_count),
                    )
                }
                RosuKind::Spinner(spinner) => {
                    HitObject::spinner(obj.start_time, Spinner::new(obj.start_time + spinner.duration))
                }
                _ => {
                    tracing::warn!("Skipping unsupported hit object at {}", obj.start_time);
                    continue;
                }
            };

            objects.push(object);
        }

        let control_points = &beatmap.control_points;
        let mut timing_points: Vec<TimingPoint> = control_points
            .timing_points
            .iter()
            .map(|tp| TimingPoint::new(tp.time, tp.beat_len))
            .collect();

        timing_points.extend(
            control_points
                .difficulty_points
                .iter()
                .filter(|dp| dp.slider_velocity > 0.0)
                .map(|dp| TimingPoint::new(dp.time, -100.0 / dp.slider_velocity)),
        );

        // Stable, so uninherited points stay first on shared offsets
        timing_points.sort_by(|a, b| a.offset.total_cmp(&b.offset));

        // Sample changes without a timing change still need a point,
        // it copies whatever point is active at that time
        for sample in &control_points.sample_points {
            if timing_points.iter().any(|tp| tp.offset == sample.time) {
                continue;
            }

            let idx = timing_points.partition_point(|tp| tp.offset <= sample.time);
            let Some(&active) = timing_points.get(idx.saturating_sub(1)) else {
                continue;
            };

            timing_points.insert(
                idx,
                TimingPoint {
                    offset: sample.time,
                    ..active
                },
            );
        }

        for point in &mut timing_points {
            if let Some(sample) = control_points.sample_point_at(point.offset) {
                point.sample_set = SampleSet::from(sample.sample_bank);
                point.volume = sample.sample_volume.clamp(0, 100) as u8;
            }
        }

        let difficulty = Difficulty {
            cs: beatmap.circle_size as f64,
            od: beatmap.overall_difficulty as f64,
            ar: beatmap.approach_rate as f64,
            slider_multiplier: beatmap.slider_multiplier as f64,
        };

        let chart = Chart::new(objects, timing_points, difficulty)?;

        if beatmap.custom_combo_colors.is_empty() {
            return Ok(chart);
        }

        let colors = beatmap
            .custom_combo_colors
            .iter()
            .map(|color| Rgb::new(color.red(), color.green(), color.blue()))
            .collect();

        Ok(chart.with_palette(ComboPalette::new(colors)))
    }
}

fn polygon_length(head: Vector2<f64>, points: &[Vector2<f64>]) -> f64 {
    let mut prev = head;
    let mut length = 0.0;

    for &point in points {
        length += (point - prev).magnitude();
        prev = point;
    }

    length
}
