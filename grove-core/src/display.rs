use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};
use tracing::trace;

/// Stable identifiers for the elements the widgets write into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetId {
    Time,
    Date,
    SeasonImage,
    WeatherImage,
}

impl TargetId {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetId::Time => "time",
            TargetId::Date => "date",
            TargetId::SeasonImage => "season-image",
            TargetId::WeatherImage => "weather-image",
        }
    }

    pub const fn all() -> &'static [TargetId] {
        &[TargetId::Time, TargetId::Date, TargetId::SeasonImage, TargetId::WeatherImage]
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A UI element owned by the host that accepts text or an image reference.
///
/// Writes must be idempotent: the widgets rewrite unchanged values on every tick.
pub trait DisplayTarget: Send + Sync {
    fn set_text(&self, text: &str);
    fn set_image_source(&self, source: &str);
}

/// Handles injected by the host, keyed by target id.
#[derive(Clone, Default)]
pub struct DisplayTargets {
    targets: HashMap<TargetId, Arc<dyn DisplayTarget>>,
}

impl fmt::Debug for DisplayTargets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.targets.keys()).finish()
    }
}

impl DisplayTargets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: TargetId, target: Arc<dyn DisplayTarget>) -> Self {
        self.insert(id, target);
        self
    }

    pub fn insert(&mut self, id: TargetId, target: Arc<dyn DisplayTarget>) {
        self.targets.insert(id, target);
    }

    pub fn contains(&self, id: TargetId) -> bool {
        self.targets.contains_key(&id)
    }

    /// Missing targets are skipped; page variants may omit any of them.
    pub fn set_text(&self, id: TargetId, text: &str) {
        match self.targets.get(&id) {
            Some(target) => target.set_text(text),
            None => trace!(target_id = %id, "no display target, skipping text"),
        }
    }

    pub fn set_image_source(&self, id: TargetId, source: &str) {
        match self.targets.get(&id) {
            Some(target) => target.set_image_source(source),
            None => trace!(target_id = %id, "no display target, skipping image"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryContents {
    pub text: Option<String>,
    pub image_source: Option<String>,
    pub writes: usize,
}

/// Keeps the last text and image written, for previews and tests.
#[derive(Debug, Default)]
pub struct MemoryTarget {
    contents: Mutex<MemoryContents>,
}

impl MemoryTarget {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn lock(&self) -> MutexGuard<'_, MemoryContents> {
        // A panic mid-write cannot leave the contents half-updated.
        self.contents.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> MemoryContents {
        self.lock().clone()
    }

    pub fn text(&self) -> Option<String> {
        self.lock().text.clone()
    }

    pub fn image_source(&self) -> Option<String> {
        self.lock().image_source.clone()
    }
}

impl DisplayTarget for MemoryTarget {
    fn set_text(&self, text: &str) {
        let mut contents = self.lock();
        contents.text = Some(text.to_string());
        contents.writes += 1;
    }

    fn set_image_source(&self, source: &str) {
        let mut contents = self.lock();
        contents.image_source = Some(source.to_string());
        contents.writes += 1;
    }
}
