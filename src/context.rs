//! Owns the current tube model and tells listeners when it changes.

use slotmap::SlotMap;
use tracing::{info, warn};

use crate::error::Result;
use crate::operations::pipe::{BuildPipe, PipeModel};
use crate::params::PipeParams;

slotmap::new_key_type! {
    /// Handle returned by [`PipeContext::subscribe`].
    pub struct SubscriptionId;
}

type Subscriber = Box<dyn FnMut(&PipeModel)>;

/// Holds the parameters and model currently on display.
///
/// Every update builds a complete new model before anything is replaced, so
/// a failed rebuild leaves the previous model in place. Subscribers run after
/// each successful swap.
pub struct PipeContext {
    params: PipeParams,
    model: PipeModel,
    subscribers: SlotMap<SubscriptionId, Subscriber>,
}

impl PipeContext {
    /// Builds the initial model.
    ///
    /// # Errors
    ///
    /// Returns an error if `params` cannot be built.
    pub fn new(params: PipeParams) -> Result<Self> {
        let model = BuildPipe::new(&params).execute()?;
        Ok(Self {
            params,
            model,
            subscribers: SlotMap::with_key(),
        })
    }

    /// Current parameters.
    #[must_use]
    pub fn params(&self) -> &PipeParams {
        &self.params
    }

    /// Current model.
    #[must_use]
    pub fn model(&self) -> &PipeModel {
        &self.model
    }

    /// Builds a model for `params` and swaps it in.
    ///
    /// # Errors
    ///
    /// Returns the build error; the previous parameters and model stay current
    /// and no subscriber runs.
    pub fn update(&mut self, params: PipeParams) -> Result<&PipeModel> {
        let model = match BuildPipe::new(&params).execute() {
            Ok(model) => model,
            Err(err) => {
                warn!(error = %err, "rebuild failed; keeping previous model");
                return Err(err);
            }
        };

        self.params = params;
        self.model = model;
        info!(
            triangles = self.model.triangle_count(),
            subscribers = self.subscribers.len(),
            "pipe model replaced"
        );

        for subscriber in self.subscribers.values_mut() {
            subscriber(&self.model);
        }
        Ok(&self.model)
    }

    /// Rebuilds with the current parameters and notifies subscribers.
    ///
    /// # Errors
    ///
    /// Returns an error if the rebuild fails.
    pub fn rebuild(&mut self) -> Result<&PipeModel> {
        self.update(self.params.clone())
    }

    /// Registers a callback run after every successful update.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&PipeModel) + 'static) -> SubscriptionId {
        self.subscribers.insert(Box::new(subscriber))
    }

    /// Removes a callback. Returns `false` if it was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id).is_some()
    }
}
