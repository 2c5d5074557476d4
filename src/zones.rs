/// Axis-aligned rectangle in pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Non-strict overlap: touching edges count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }
}

/// A named rectangular region used for ambient location notifications.
/// Names need not be unique and zones may overlap.
#[derive(Debug, Clone)]
pub struct Zone {
    pub name: String,
    pub bounds: Rect,
}

/// Change reported by the tracker when the occupied zone switches
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneTransition {
    Entered(String),
    Left,
}

/// Tracks which registered zone currently contains the actor's collision
/// box.
///
/// When several zones overlap the box on the same tick, the last one in
/// registration order wins; that is deterministic but carries no priority
/// meaning.
pub struct ZoneTracker {
    zones: Vec<Zone>,
    current: Option<String>,
    previous: Option<String>,
}

impl ZoneTracker {
    pub fn new(zones: Vec<Zone>) -> Self {
        ZoneTracker {
            zones,
            current: None,
            previous: None,
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    fn overlapping_zone(&self, body: &Rect) -> Option<&Zone> {
        self.zones.iter().filter(|z| z.bounds.overlaps(body)).last()
    }

    /// Prime the tracker with the zone containing the spawn position, so the
    /// first tick does not announce the zone the actor started in
    pub fn seed(&mut self, body: &Rect) {
        self.current = self.overlapping_zone(body).map(|z| z.name.clone());
    }

    /// Re-evaluate against the body rectangle and report a transition, if
    /// any. Leaving every zone clears the current zone without an
    /// enter-style event.
    pub fn update(&mut self, body: &Rect) -> Option<ZoneTransition> {
        match self.overlapping_zone(body).map(|z| z.name.clone()) {
            Some(name) => {
                if self.current.as_deref() != Some(name.as_str()) {
                    self.previous = self.current.take();
                    self.current = Some(name.clone());
                    Some(ZoneTransition::Entered(name))
                } else {
                    None
                }
            }
            None => {
                if self.current.is_some() {
                    self.previous = self.current.take();
                    Some(ZoneTransition::Left)
                } else {
                    None
                }
            }
        }
    }
}
