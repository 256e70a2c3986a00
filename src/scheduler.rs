use crate::{
    chart::Chart,
    config::Config,
    draw_order::{DrawOrder, Layer},
    hit_objects::{ObjectId, ObjectState},
    processor::events::FrameEvents,
};

/// Object currently inside the playback window
#[derive(Debug, Clone)]
pub struct ActiveObject {
    id: ObjectId,
    depth: u32,
    pub state: ObjectState,
}

impl ActiveObject {
    /// Index of the object in its chart
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Activation index, fixed for the whole lifetime
    pub fn depth(&self) -> u32 {
        self.depth
    }
}

/// Keeps track of which objects are close enough to the current
/// time to be drawn and judged
#[derive(Debug, Default)]
pub struct Scheduler {
    /// Next object to activate
    cursor: usize,
    activations: u32,
    /// Activation (and chart) order
    active: Vec<ActiveObject>,
    draw_order: DrawOrder,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, chart: &Chart, config: &Config, time: f64, events: &mut FrameEvents) {
        let horizon = time + config.horizon_ms;

        while let Some(obj) = chart.object(self.cursor) {
            if obj.time >= horizon {
                break;
            }

            let id = self.cursor;
            let depth = self.activations;

            self.cursor += 1;
            self.activations += 1;

            tracing::debug!("[{time}] Activating object {id} at {} with depth {depth}", obj.time);

            self.draw_order.insert_object(id, depth, Layer::for_kind(&obj.kind));
            self.active.push(ActiveObject {
                id,
                depth,
                state: obj.create_state(chart, config),
            });

            events.spawned.push(id);
        }

        let margin = config.despawn_margin_ms;
        let draw_order = &mut self.draw_order;

        self.active.retain(|active| {
            let Some(obj) = chart.object(active.id) else {
                return false;
            };

            let expired = time - obj.time > margin + active.state.duration();

            if expired {
                tracing::debug!("[{time}] Despawning object {}", active.id);
                draw_order.remove(active.id);
                events.despawned.push(active.id);
            }

            !expired
        });
    }

    pub fn active(&self) -> &[ActiveObject] {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut [ActiveObject] {
        &mut self.active
    }

    pub fn get(&self, id: ObjectId) -> Option<&ActiveObject> {
        self.active.iter().find(|active| active.id == id)
    }

    pub fn is_active(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    pub fn draw_order(&self) -> &DrawOrder {
        &self.draw_order
    }

    /// Every object was activated and despawned
    pub fn is_finished(&self, chart: &Chart) -> bool {
        self.cursor >= chart.len() && self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector2;
    use crate::{
        difficulty::Difficulty,
        hit_objects::{circle::Circle, spinner::Spinner, HitObject},
        timing::TimingPoint,
    };

    fn chart(objects: Vec<HitObject>) -> Chart {
        Chart::new(objects, vec![TimingPoint::new(0.0, 500.0)], Difficulty::default()).unwrap()
    }

    fn circle(time: f64) -> HitObject {
        HitObject::circle(time, Circle::new(Vector2::new(0.0, 0.0), 0))
    }

    #[test]
    fn test_same_time_objects_keep_chart_order() {
        let chart = chart(vec![circle(1000.0), circle(1000.0), circle(1000.0)]);
        let mut scheduler = Scheduler::new();
        let mut events = FrameEvents::default();

        scheduler.update(&chart, &Config::default(), 0.0, &mut events);

        let depths: Vec<_> = scheduler.active().iter().map(|a| (a.id(), a.depth())).collect();
        assert_eq!(depths, vec![(0, 0), (1, 1), (2, 2)]);
        assert_eq!(events.spawned.as_slice(), &[0, 1, 2]);
        assert_eq!(scheduler.draw_order().len(), 9);
    }

    #[test]
    fn test_spinner_stays_for_its_duration() {
        let chart = chart(vec![HitObject::spinner(1000.0, Spinner::new(5000.0))]);
        let config = Config::default();
        let mut scheduler = Scheduler::new();
        let mut events = FrameEvents::default();

        scheduler.update(&chart, &config, 0.0, &mut events);
        scheduler.update(&chart, &config, 7000.0, &mut events);
        assert!(scheduler.is_active(0));

        scheduler.update(&chart, &config, 7001.0, &mut events);
        assert!(!scheduler.is_active(0));
        assert_eq!(events.despawned.as_slice(), &[0]);
        assert!(scheduler.draw_order().is_empty());
        assert!(scheduler.is_finished(&chart));
    }

    #[test]
    fn test_never_reactivated() {
        let chart = chart(vec![circle(1000.0)]);
        let config = Config::default();
        let mut scheduler = Scheduler::new();
        let mut events = FrameEvents::default();

        scheduler.update(&chart, &config, 0.0, &mut events);
        scheduler.update(&chart, &config, 4000.0, &mut events);
        scheduler.update(&chart, &config, 0.0, &mut events);

        assert!(scheduler.active().is_empty());
        assert_eq!(events.spawned.len(), 1);
    }
}
