//! ClassificationWorker - Gated Classification Loop
//!
//! ## Responsibilities
//!
//! - Poll the enabled flag at a fixed cadence, idling while disabled
//! - Per cycle: pull the latest frame, decode, classify, enrich with
//!   advisory text, publish to the result slot
//! - Absorb every per-cycle failure; one bad frame never stops the loop
//!
//! Decode and inference run on a blocking task, so a slow model
//! throttles only the classification rate, never capture or streaming.

use crate::classification_config::ClassificationConfig;
use crate::classifier::Classifier;
use crate::error::{Error, Result};
use crate::frame_buffer::FrameBuffer;
use crate::fruit_info::FruitInfo;
use crate::models::ClassificationResult;
use crate::result_slot::ResultSlot;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::{interval, MissedTickBehavior};

/// ClassificationWorker instance
pub struct ClassificationWorker {
    frame_buffer: Arc<FrameBuffer>,
    result_slot: Arc<ResultSlot>,
    config: Arc<ClassificationConfig>,
    classifier: Arc<dyn Classifier>,
    fruit_info: Arc<FruitInfo>,
    worker_hz: u32,
    running: Arc<RwLock<bool>>,
}

impl ClassificationWorker {
    /// Create new ClassificationWorker
    pub fn new(
        frame_buffer: Arc<FrameBuffer>,
        result_slot: Arc<ResultSlot>,
        config: Arc<ClassificationConfig>,
        classifier: Arc<dyn Classifier>,
        fruit_info: Arc<FruitInfo>,
        worker_hz: u32,
    ) -> Self {
        Self {
            frame_buffer,
            result_slot,
            config,
            classifier,
            fruit_info,
            worker_hz,
            running: Arc::new(RwLock::new(false)),
        }
    }

    /// Start the worker loop
    pub async fn start(&self) {
        {
            let mut running = self.running.write().await;
            if *running {
                tracing::warn!("Classification worker already running");
                return;
            }
            *running = true;
        }

        tracing::info!(worker_hz = self.worker_hz, "Starting classification worker");

        let frame_buffer = self.frame_buffer.clone();
        let result_slot = self.result_slot.clone();
        let config = self.config.clone();
        let classifier = self.classifier.clone();
        let fruit_info = self.fruit_info.clone();
        let running = self.running.clone();
        let period = Duration::from_secs_f64(1.0 / f64::from(self.worker_hz.max(1)));

        tokio::spawn(async move {
            let mut interval = interval(period);
            // A slow cycle delays the next tick instead of bursting to
            // catch up, keeping the cadence an upper bound
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;

                {
                    let is_running = running.read().await;
                    if !*is_running {
                        break;
                    }
                }

                // Idle until enabled; start/stop take effect on the
                // next tick
                if !config.is_enabled() {
                    continue;
                }

                if let Err(e) =
                    Self::run_cycle(&frame_buffer, &result_slot, &config, &classifier, &fruit_info)
                        .await
                {
                    tracing::error!(error = %e, "Classification cycle failed");
                }
            }

            tracing::info!("Classification worker stopped");
        });
    }

    /// Stop the worker loop
    pub async fn stop(&self) {
        let mut running = self.running.write().await;
        *running = false;
        tracing::info!("Stopping classification worker");
    }

    /// Run one classification cycle. Returns whether a result was
    /// published; an empty frame buffer is not an error, the cycle is
    /// simply skipped.
    pub(crate) async fn run_cycle(
        frame_buffer: &FrameBuffer,
        result_slot: &ResultSlot,
        config: &ClassificationConfig,
        classifier: &Arc<dyn Classifier>,
        fruit_info: &FruitInfo,
    ) -> Result<bool> {
        let Some(frame) = frame_buffer.get() else {
            return Ok(false);
        };

        let threshold = config.confidence_threshold();
        let classifier = Arc::clone(classifier);
        let prediction = tokio::task::spawn_blocking(move || {
            let image = image::load_from_memory(&frame.data)
                .map_err(|e| Error::Decode(format!("frame decode failed: {}", e)))?;
            classifier.classify(&image, threshold)
        })
        .await
        .map_err(|e| Error::Internal(format!("classification task failed: {}", e)))??;

        let info = fruit_info.get_info(&prediction.fruit.label, &prediction.quality.label);
        let result = ClassificationResult::new(prediction.fruit, prediction.quality, info);

        tracing::debug!(
            fruit = %result.fruit.label,
            quality = %result.quality.label,
            probability = result.fruit.probability,
            "Classification result published"
        );

        result_slot.publish(result);
        Ok(true)
    }
}
