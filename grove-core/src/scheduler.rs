use std::{sync::Arc, time::Duration};
use tokio::{
    task::{JoinHandle, JoinSet},
    time::{self, MissedTickBehavior},
};
use tracing::{debug, error, info};

use crate::{error::CadenceError, widgets::Widgets};

/// Refresh period of each widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    pub time: Duration,
    pub date: Duration,
    pub season: Duration,
    pub weather: Duration,
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            time: Duration::from_secs(1),
            date: Duration::from_secs(60 * 60),
            season: Duration::from_secs(60 * 60),
            weather: Duration::from_secs(30 * 60),
        }
    }
}

impl Cadence {
    /// Every period must be non-zero.
    pub fn validate(&self) -> Result<(), CadenceError> {
        for (widget, period) in [
            ("time", self.time),
            ("date", self.date),
            ("season", self.season),
            ("weather", self.weather),
        ] {
            if period.is_zero() {
                return Err(CadenceError::ZeroPeriod(widget));
            }
        }

        Ok(())
    }
}

/// Owns one repeating task per widget. Dropping it cancels them all.
///
/// Must be started from within a tokio runtime.
#[derive(Debug)]
pub struct RefreshScheduler {
    tasks: Vec<JoinHandle<()>>,
}

impl RefreshScheduler {
    /// Spawn the refresh tasks; nothing is spawned if the cadence is invalid.
    pub fn start(widgets: Arc<Widgets>, cadence: Cadence) -> Result<Self, CadenceError> {
        cadence.validate()?;
        info!(?cadence, "starting widget refresh");

        let tasks = vec![
            repeat("time", cadence.time, {
                let widgets = widgets.clone();
                move || {
                    widgets.update_time();
                }
            }),
            repeat("date", cadence.date, {
                let widgets = widgets.clone();
                move || {
                    widgets.update_date();
                }
            }),
            repeat("season", cadence.season, {
                let widgets = widgets.clone();
                move || {
                    if let Err(err) = widgets.update_season() {
                        error!(error = %err, "season refresh skipped");
                    }
                }
            }),
            tokio::spawn(weather_loop(widgets, cadence.weather)),
        ];

        Ok(Self { tasks })
    }

    /// Number of tasks still running.
    pub fn active_tasks(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_finished()).count()
    }

    /// Cancel every refresh task and wait for them to stop.
    pub async fn shutdown(mut self) {
        let tasks = std::mem::take(&mut self.tasks);
        for task in &tasks {
            task.abort();
        }
        for task in tasks {
            // Aborted tasks resolve to a cancellation error.
            let _ = task.await;
        }
        info!("widget refresh stopped");
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

/// Run `tick` now and then once per `period`.
fn repeat<F>(name: &'static str, period: Duration, mut tick: F) -> JoinHandle<()>
where
    F: FnMut() + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            debug!(widget = name, "refresh");
            tick();
        }
    })
}

/// Each tick starts a fresh fetch without waiting for earlier ones; whichever
/// attempt finishes last owns the weather image.
async fn weather_loop(widgets: Arc<Widgets>, period: Duration) {
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut attempts = JoinSet::new();

    loop {
        tokio::select! {
            _ = interval.tick() => {
                debug!(widget = "weather", in_flight = attempts.len(), "refresh");
                let widgets = widgets.clone();
                attempts.spawn(async move {
                    widgets.update_weather().await;
                });
            }
            Some(_) = attempts.join_next(), if !attempts.is_empty() => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::FixedClock,
        display::{DisplayTargets, MemoryTarget, TargetId},
        error::FetchError,
        mock::{MockWeather, WinterSplit},
        provider::{WeatherProvider, offline::OfflineProvider},
        weather::IconSet,
    };
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers after a delay, with a different code per call.
    #[derive(Debug)]
    struct SlowProvider {
        calls: AtomicUsize,
        delays: Vec<Duration>,
        codes: Vec<u16>,
    }

    #[async_trait]
    impl WeatherProvider for SlowProvider {
        async fn fetch_weather_code(&self) -> Result<u16, FetchError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            time::sleep(self.delays[n.min(self.delays.len() - 1)]).await;
            Ok(self.codes[n.min(self.codes.len() - 1)])
        }
    }

    struct Page {
        time: Arc<MemoryTarget>,
        date: Arc<MemoryTarget>,
        season: Arc<MemoryTarget>,
        weather: Arc<MemoryTarget>,
    }

    fn page(provider: Box<dyn WeatherProvider>) -> (Page, Arc<Widgets>) {
        let page = Page {
            time: MemoryTarget::new(),
            date: MemoryTarget::new(),
            season: MemoryTarget::new(),
            weather: MemoryTarget::new(),
        };
        let targets = DisplayTargets::new()
            .with(TargetId::Time, page.time.clone())
            .with(TargetId::Date, page.date.clone())
            .with(TargetId::SeasonImage, page.season.clone())
            .with(TargetId::WeatherImage, page.weather.clone());
        let now = NaiveDate::from_ymd_opt(2026, 1, 14)
            .and_then(|d| d.and_hms_opt(21, 5, 0))
            .expect("valid instant");

        let widgets = Widgets::new(
            Arc::new(FixedClock(now)),
            targets,
            provider,
            MockWeather::seeded(5, WinterSplit::ThreeWay),
            IconSet::default(),
        );

        (page, Arc::new(widgets))
    }

    #[tokio::test(start_paused = true)]
    async fn every_widget_refreshes_immediately() {
        let (page, widgets) = page(Box::new(OfflineProvider));
        let scheduler =
            RefreshScheduler::start(widgets, Cadence::default()).expect("valid cadence");

        time::sleep(Duration::from_millis(10)).await;

        assert_eq!(page.time.text().as_deref(), Some("9:05 pm"));
        assert_eq!(page.date.text().as_deref(), Some("Wed. 14"));
        assert_eq!(page.season.image_source().as_deref(), Some("assets/Winter.png"));
        let weather = page.weather.image_source().expect("weather written");
        assert!(weather == "assets/Rain.png" || weather == "assets/Sun.png", "{weather}");

        scheduler.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn widgets_keep_their_own_cadence() {
        let (page, widgets) = page(Box::new(OfflineProvider));
        let scheduler =
            RefreshScheduler::start(widgets, Cadence::default()).expect("valid cadence");

        time::sleep(Duration::from_millis(5_500)).await;

        // Time ticks at 0..=5 s; the hourly and half-hourly widgets only once.
        assert_eq!(page.time.snapshot().writes, 6);
        assert_eq!(page.date.snapshot().writes, 1);
        assert_eq!(page.season.snapshot().writes, 1);
        assert_eq!(page.weather.snapshot().writes, 1);

        time::sleep(Duration::from_secs(30 * 60)).await;
        assert_eq!(page.weather.snapshot().writes, 2);
        assert_eq!(page.date.snapshot().writes, 1);

        scheduler.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_fetches_last_write_wins() {
        // The first attempt outlives the next tick and lands last.
        let provider = SlowProvider {
            calls: AtomicUsize::new(0),
            delays: vec![Duration::from_secs(90), Duration::from_secs(1)],
            codes: vec![95, 61],
        };
        let (page, widgets) = page(Box::new(provider));
        let cadence = Cadence { weather: Duration::from_secs(60), ..Cadence::default() };
        let scheduler = RefreshScheduler::start(widgets, cadence).expect("valid cadence");

        time::sleep(Duration::from_secs(62)).await;
        assert_eq!(page.weather.image_source().as_deref(), Some("assets/Rain.png"));

        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(page.weather.image_source().as_deref(), Some("assets/Storm.png"));

        scheduler.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn zero_period_is_rejected_before_spawning() {
        let (page, widgets) = page(Box::new(OfflineProvider));
        let cadence = Cadence { time: Duration::ZERO, ..Cadence::default() };

        let err = RefreshScheduler::start(widgets.clone(), cadence).unwrap_err();
        assert_eq!(err, CadenceError::ZeroPeriod("time"));
        assert_eq!(err.to_string(), "refresh period for time must be positive");

        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(page.time.snapshot().writes, 0);
        assert_eq!(page.weather.snapshot().writes, 0);
        assert_eq!(Arc::strong_count(&widgets), 1);
    }

    #[test]
    fn every_zero_period_is_named() {
        let zero = Duration::ZERO;
        let base = Cadence::default();

        assert_eq!(base.validate(), Ok(()));
        assert_eq!(
            Cadence { date: zero, ..base }.validate(),
            Err(CadenceError::ZeroPeriod("date"))
        );
        assert_eq!(
            Cadence { season: zero, ..base }.validate(),
            Err(CadenceError::ZeroPeriod("season"))
        );
        assert_eq!(
            Cadence { weather: zero, ..base }.validate(),
            Err(CadenceError::ZeroPeriod("weather"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_all_writes() {
        let (page, widgets) = page(Box::new(OfflineProvider));
        let scheduler =
            RefreshScheduler::start(widgets, Cadence::default()).expect("valid cadence");

        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(scheduler.active_tasks(), 4);
        scheduler.shutdown().await;

        let writes = page.time.snapshot().writes;
        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(page.time.snapshot().writes, writes);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_scheduler_cancels_in_flight_fetches() {
        let provider = SlowProvider {
            calls: AtomicUsize::new(0),
            delays: vec![Duration::from_secs(120)],
            codes: vec![95],
        };
        let (page, widgets) = page(Box::new(provider));
        let scheduler =
            RefreshScheduler::start(widgets.clone(), Cadence::default()).expect("valid cadence");

        time::sleep(Duration::from_secs(1)).await;
        drop(scheduler);
        time::sleep(Duration::from_secs(300)).await;

        assert_eq!(page.weather.image_source(), None);
        // Only the test still holds the widgets once every task is gone.
        assert_eq!(Arc::strong_count(&widgets), 1);
    }
}
