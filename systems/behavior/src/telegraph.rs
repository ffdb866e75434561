use grid_siege_core::{Event, ProjectileRequest, Telegraph};

/// Pending telegraphs owned by the simulation.
///
/// Telegraphs are independent of their owners: a queued attack still lands
/// after the enemy that announced it has died.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TelegraphQueue {
    pending: Vec<Telegraph>,
}

impl TelegraphQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds newly announced telegraphs.
    pub fn schedule(&mut self, telegraphs: impl IntoIterator<Item = Telegraph>) {
        self.pending.extend(telegraphs);
    }

    /// Advances every countdown, emitting the shots of those that expire.
    pub fn tick(&mut self, shots: &mut Vec<ProjectileRequest>, events: &mut Vec<Event>) {
        for telegraph in &mut self.pending {
            if telegraph.tick() {
                shots.push(telegraph.shot.clone());
                events.push(Event::TelegraphDetonated {
                    target: telegraph.target,
                });
            }
        }
        self.pending.retain(|telegraph| telegraph.active);
    }

    /// Telegraphs still counting down.
    #[must_use]
    pub fn pending(&self) -> &[Telegraph] {
        &self.pending
    }

    /// Drops every pending telegraph.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
