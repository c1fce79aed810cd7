//! The contact widget: form state, burst effects and submission wired together
//!
//! The widget is owned by one task (the UI loop). Submitting starts two
//! independent background tasks, the network request and the particle
//! clear timer, and each reports back through an event channel. The owner
//! applies those events with [`ContactWidget::poll_events`] on every tick
//! or awaits them with [`ContactWidget::next_event`].
//!
//! Dropping the widget cancels both tasks; anything that still completes
//! finds the receiver gone and is discarded.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

use crate::api::transport::{ContactTransport, HttpTransport};
use crate::effects::burst::{BurstState, Particle};
use crate::effects::random::{FastRandSource, RandomSource};
use crate::form::{FieldIssue, FormField, FormValues};
use crate::status::SubmissionStatus;
use crate::utils::config::WidgetConfig;
use crate::utils::error::SubmissionError;

/// Completion of a background task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    SubmissionFinished(Result<(), SubmissionError>),
    BurstExpired { key: u64 },
}

pub struct ContactWidget {
    config: WidgetConfig,
    form: FormValues,
    status: SubmissionStatus,
    burst: BurstState,
    rng: Box<dyn RandomSource>,
    transport: Arc<dyn ContactTransport>,
    events_tx: UnboundedSender<WidgetEvent>,
    events_rx: UnboundedReceiver<WidgetEvent>,
    cancel: CancellationToken,
}

impl ContactWidget {
    /// Widget posting to the endpoint `config` resolves to
    pub fn new(config: WidgetConfig) -> Self {
        let transport = Arc::new(HttpTransport::new(&config));
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            config,
            form: FormValues::default(),
            status: SubmissionStatus::Idle,
            burst: BurstState::new(),
            rng: Box::new(FastRandSource::new()),
            transport,
            events_tx,
            events_rx,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_transport(mut self, transport: Arc<dyn ContactTransport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_random_source(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn values(&self) -> &FormValues {
        &self.form
    }

    pub fn field(&self, field: FormField) -> &str {
        self.form.get(field)
    }

    /// Replace one field's value; the other fields are untouched
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    /// Submit control is disabled while a request is in flight
    pub fn submit_disabled(&self) -> bool {
        self.is_loading()
    }

    pub fn burst(&self) -> &BurstState {
        &self.burst
    }

    pub fn particles(&self) -> &[Particle] {
        self.burst.particles()
    }

    pub fn burst_key(&self) -> u64 {
        self.burst.key()
    }

    /// Field a host should focus instead of submitting, and why
    pub fn validation_target(&self) -> Option<(FormField, FieldIssue)> {
        self.form.first_invalid()
    }

    /// Generate a fresh burst and schedule its removal
    pub fn trigger_burst(&mut self) -> u64 {
        let key = self.burst.trigger(self.rng.as_mut());
        let delay = self.config.clear_delay();
        let tx = self.events_tx.clone();
        let cancel = self.cancel.clone();

        tracing::debug!("Burst {} triggered, clearing in {:?}", key, delay);

        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let _ = tx.send(WidgetEvent::BurstExpired { key });
                }
            }
        });

        key
    }

    /// Start a submission. Returns `false` (and does nothing) while one is
    /// already in flight.
    pub fn submit(&mut self) -> bool {
        if self.is_loading() {
            tracing::debug!("Submit ignored, request already in flight");
            return false;
        }

        self.trigger_burst();
        self.status = SubmissionStatus::loading();

        let values = self.form.clone();
        let transport = Arc::clone(&self.transport);
        let tx = self.events_tx.clone();
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                result = transport.send(&values) => {
                    let _ = tx.send(WidgetEvent::SubmissionFinished(result));
                }
            }
        });

        true
    }

    fn apply(&mut self, event: &WidgetEvent) {
        match event {
            WidgetEvent::SubmissionFinished(result) => {
                if !self.is_loading() {
                    return;
                }
                match result {
                    Ok(()) => {
                        tracing::info!("Contact message submitted");
                        self.status = SubmissionStatus::success();
                        self.form.reset();
                    }
                    Err(err) => {
                        tracing::warn!(
                            status = ?err.status_code(),
                            "Contact submission failed: {:?}",
                            err
                        );
                        self.status = SubmissionStatus::error(err.user_message());
                    }
                }
            }
            WidgetEvent::BurstExpired { key } => {
                if self.burst.clear(*key) {
                    tracing::debug!("Burst {} cleared", key);
                }
            }
        }
    }

    /// Apply every event that has already arrived; returns how many
    pub fn poll_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(&event);
            applied += 1;
        }
        applied
    }

    /// Wait for the next event and apply it
    pub async fn next_event(&mut self) -> Option<WidgetEvent> {
        let event = self.events_rx.recv().await?;
        self.apply(&event);
        Some(event)
    }

    /// Wait until the in-flight submission (if any) has resolved
    pub async fn settle(&mut self) {
        while self.is_loading() {
            if self.next_event().await.is_none() {
                break;
            }
        }
    }
}

impl Drop for ContactWidget {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::burst::{CLEAR_DELAY_MS, PARTICLE_COUNT};
    use crate::effects::random::SequenceSource;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingTransport {
        calls: AtomicUsize,
        result: Result<(), SubmissionError>,
    }

    #[async_trait]
    impl ContactTransport for CountingTransport {
        async fn send(&self, _values: &FormValues) -> Result<(), SubmissionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    fn widget_with(result: Result<(), SubmissionError>) -> (ContactWidget, Arc<CountingTransport>) {
        let transport = Arc::new(CountingTransport {
            calls: AtomicUsize::new(0),
            result,
        });
        let widget = ContactWidget::new(WidgetConfig::default())
            .with_transport(transport.clone())
            .with_random_source(SequenceSource::new(vec![0.1, 0.7, 0.3, 0.9]));
        (widget, transport)
    }

    #[tokio::test]
    async fn test_submit_success_resets_form() {
        let (mut widget, transport) = widget_with(Ok(()));
        widget.set_field(FormField::Email, "a@b.com");
        widget.set_field(FormField::Subject, "Hi");
        widget.set_field(FormField::Message, "Test");

        assert!(widget.submit());
        assert!(widget.is_loading());
        assert!(widget.submit_disabled());

        widget.settle().await;
        assert_eq!(widget.status(), &SubmissionStatus::success());
        assert!(widget.values().is_empty());
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_form() {
        let (mut widget, _) = widget_with(Err(SubmissionError::Server {
            status: 400,
            detail: Some("bad email".to_string()),
        }));
        widget.set_field(FormField::Email, "nope");

        widget.submit();
        widget.settle().await;

        assert_eq!(widget.status(), &SubmissionStatus::error("bad email"));
        assert_eq!(widget.field(FormField::Email), "nope");
    }

    #[tokio::test]
    async fn test_second_submit_while_loading_is_ignored() {
        let (mut widget, transport) = widget_with(Ok(()));
        assert!(widget.submit());
        let key = widget.burst_key();

        assert!(!widget.submit());
        assert_eq!(widget.burst_key(), key);

        widget.settle().await;
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_clears_after_delay() {
        let (mut widget, _) = widget_with(Ok(()));
        widget.trigger_burst();
        assert_eq!(widget.particles().len(), PARTICLE_COUNT);

        tokio::time::sleep(Duration::from_millis(CLEAR_DELAY_MS - 1)).await;
        widget.poll_events();
        assert_eq!(widget.particles().len(), PARTICLE_COUNT);

        let event = widget.next_event().await;
        assert_eq!(event, Some(WidgetEvent::BurstExpired { key: 1 }));
        assert!(widget.particles().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_submission_after_drop_is_discarded() {
        let (mut widget, _) = widget_with(Ok(()));
        widget.submit();
        drop(widget);
        // Pending tasks observe cancellation and exit quietly
        tokio::time::sleep(Duration::from_millis(2000)).await;
    }

    #[tokio::test]
    async fn test_stray_result_is_ignored_when_idle() {
        let (mut widget, _) = widget_with(Ok(()));
        widget.set_field(FormField::Message, "keep me");
        widget
            .events_tx
            .send(WidgetEvent::SubmissionFinished(Ok(())))
            .unwrap();
        assert_eq!(widget.poll_events(), 1);
        assert_eq!(widget.status(), &SubmissionStatus::Idle);
        assert_eq!(widget.field(FormField::Message), "keep me");
    }
}
