//! Workout data model.
//!
//! A workout is one of two fixed shapes sharing a common block of fields.
//! The derived metric (pace or speed) is computed once at construction and
//! the fields are only readable afterwards, so a record can never disagree
//! with its own distance and duration.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;
use std::fmt;

/// A `(latitude, longitude)` pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Value used by the activity `<select>` and as CSS prefix.
    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    pub fn from_form_value(value: &str) -> Option<Self> {
        match value {
            "running" => Some(WorkoutKind::Running),
            "cycling" => Some(WorkoutKind::Cycling),
            _ => None,
        }
    }

    /// Capitalised label, e.g. `Running`.
    pub fn label(self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque workout identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WorkoutId(u64);

impl WorkoutId {
    pub fn generate() -> Self {
        WorkoutId(rand::random::<u64>())
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Fields shared by every workout variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutCommon {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    coords: Coords,
    distance: f64,
    duration: f64,
}

impl WorkoutCommon {
    fn new(coords: Coords, distance: f64, duration: f64) -> Self {
        Self {
            id: WorkoutId::generate(),
            created_at: Utc::now(),
            coords,
            distance,
            duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Running {
    #[serde(flatten)]
    common: WorkoutCommon,
    temperature: f64,
    /// Minutes per kilometre.
    pace: f64,
}

impl Running {
    pub fn new(coords: Coords, distance: f64, duration: f64, temperature: f64) -> Self {
        Self {
            common: WorkoutCommon::new(coords, distance, duration),
            temperature,
            pace: duration / distance,
        }
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn pace(&self) -> f64 {
        self.pace
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cycling {
    #[serde(flatten)]
    common: WorkoutCommon,
    climb: f64,
    speed: f64,
}

impl Cycling {
    pub fn new(coords: Coords, distance: f64, duration: f64, climb: f64) -> Self {
        Self {
            common: WorkoutCommon::new(coords, distance, duration),
            climb,
            speed: distance / duration / 60.0,
        }
    }

    pub fn climb(&self) -> f64 {
        self.climb
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }
}

/// One logged activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Workout {
    Running(Running),
    Cycling(Cycling),
}

impl Workout {
    /// Build the variant matching `kind`; `extra` is the temperature for a
    /// run and the climb for a ride.
    pub fn new(kind: WorkoutKind, coords: Coords, distance: f64, duration: f64, extra: f64) -> Self {
        match kind {
            WorkoutKind::Running => Workout::Running(Running::new(coords, distance, duration, extra)),
            WorkoutKind::Cycling => Workout::Cycling(Cycling::new(coords, distance, duration, extra)),
        }
    }

    fn common(&self) -> &WorkoutCommon {
        match self {
            Workout::Running(r) => &r.common,
            Workout::Cycling(c) => &c.common,
        }
    }

    pub fn kind(&self) -> WorkoutKind {
        match self {
            Workout::Running(_) => WorkoutKind::Running,
            Workout::Cycling(_) => WorkoutKind::Cycling,
        }
    }

    pub fn id(&self) -> WorkoutId {
        self.common().id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.common().created_at
    }

    pub fn coords(&self) -> Coords {
        self.common().coords
    }

    pub fn distance(&self) -> f64 {
        self.common().distance
    }

    pub fn duration(&self) -> f64 {
        self.common().duration
    }

    /// Pace for a run, speed for a ride.
    pub fn metric(&self) -> f64 {
        match self {
            Workout::Running(r) => r.pace,
            Workout::Cycling(c) => c.speed,
        }
    }

    /// Temperature for a run, climb for a ride.
    pub fn extra(&self) -> f64 {
        match self {
            Workout::Running(r) => r.temperature,
            Workout::Cycling(c) => c.climb,
        }
    }

    /// e.g. `Running on October 19`, dated in the user's time zone.
    pub fn description(&self) -> String {
        self.description_in(&Local)
    }

    fn description_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        format!(
            "{} on {}",
            self.kind().label(),
            self.created_at().with_timezone(tz).format("%B %-d")
        )
    }
}
