//! In-memory, append-only list of workouts for the current page session.

use crate::workout::{Workout, WorkoutId};

#[derive(Debug, Default)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add to the end. No dedup, no limit.
    pub fn append(&mut self, workout: Workout) {
        self.workouts.push(workout);
    }

    /// Every workout, oldest first.
    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Workout> {
        self.workouts.iter()
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn last(&self) -> Option<&Workout> {
        self.workouts.last()
    }

    pub fn get(&self, id: WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }
}

impl<'a> IntoIterator for &'a WorkoutStore {
    type Item = &'a Workout;
    type IntoIter = std::slice::Iter<'a, Workout>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
