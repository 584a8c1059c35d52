//! Form controller: the surface a rendering layer talks to
//!
//! Change events go through the formatter into the store; the sync
//! controller keeps validation current; submission is gated on the result.

use crate::card::{mask_card_number, BrandHints};
use crate::clock::{Clock, SystemClock};
use crate::config::CheckoutConfig;
use crate::engine::{ValidationEngine, ValidationState};
use crate::error::SubmitError;
use crate::field::{FieldName, FormSnapshot};
use crate::format::FormatterPipeline;
use crate::payment::PaymentRequest;
use crate::store::FieldModelStore;
use crate::sync::SyncController;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub type SuccessCallback = Box<dyn FnMut(&FormSnapshot)>;

/// Everything an input needs to render itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldProps {
    pub name: FieldName,
    /// Current formatted value, empty when untouched
    pub value: String,
    /// Joined error text, empty when the field is clean
    pub error: String,
    pub invalid: bool,
    /// Brand icon emphasis; only set for the card number
    pub brand_hints: Option<BrandHints>,
}

pub struct FormController {
    id: Uuid,
    config: CheckoutConfig,
    pipeline: FormatterPipeline,
    store: FieldModelStore,
    sync: SyncController,
    on_success: SuccessCallback,
    loading: bool,
}

impl FormController {
    /// Checkout rules against the local wall clock
    pub fn new<F>(config: CheckoutConfig, on_success: F) -> Self
    where
        F: FnMut(&FormSnapshot) + 'static,
    {
        Self::with_clock(config, Arc::new(SystemClock), on_success)
    }

    pub fn with_clock<F>(config: CheckoutConfig, clock: Arc<dyn Clock>, on_success: F) -> Self
    where
        F: FnMut(&FormSnapshot) + 'static,
    {
        let engine = ValidationEngine::checkout_with_clock(&config, clock);
        Self::with_engine(config, engine, on_success)
    }

    pub fn with_engine<F>(config: CheckoutConfig, engine: ValidationEngine, on_success: F) -> Self
    where
        F: FnMut(&FormSnapshot) + 'static,
    {
        let mut store = FieldModelStore::new();
        let sync = SyncController::attach(&mut store, engine);
        let id = Uuid::new_v4();
        debug!(target: "checkout::form", form_id = %id, "checkout form created");

        Self {
            id,
            config,
            pipeline: FormatterPipeline::new(),
            store,
            sync,
            on_success: Box::new(on_success),
            loading: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// Bind an input: current display props for `field`
    pub fn register(&self, field: FieldName) -> FieldProps {
        let state = self.sync.state();
        let snapshot = self.store.snapshot();
        FieldProps {
            name: field,
            value: snapshot.get(field).unwrap_or_default().to_string(),
            error: state.joined(field, &self.config.error_separator),
            invalid: state.errors.has_field_errors(field),
            brand_hints: (field == FieldName::CardNumber)
                .then(|| BrandHints::for_number(snapshot.get(field))),
        }
    }

    /// Handle a raw change event for `field`
    pub fn handle_change(&mut self, field: FieldName, raw: &str) -> Arc<FormSnapshot> {
        let current = self.store.snapshot();
        let previous = current.get(field).unwrap_or_default();
        let formatted = self.pipeline.apply(field, raw, previous);
        self.store.update(field, Some(formatted))
    }

    pub fn value(&self, field: FieldName) -> Option<String> {
        self.store.snapshot().get(field).map(str::to_string)
    }

    pub fn snapshot(&self) -> Arc<FormSnapshot> {
        self.store.snapshot()
    }

    pub fn validation_state(&self) -> ValidationState {
        self.sync.state()
    }

    pub fn is_invalid(&self) -> bool {
        self.sync.is_invalid()
    }

    pub fn errors_for(&self, field: FieldName) -> String {
        self.sync
            .state()
            .joined(field, &self.config.error_separator)
    }

    pub fn brand_hints(&self) -> BrandHints {
        BrandHints::for_number(self.store.snapshot().get(FieldName::CardNumber))
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn submit_text(&self) -> &str {
        &self.config.submit_text
    }

    pub fn can_submit(&self) -> bool {
        !self.is_invalid() && !self.loading
    }

    /// Hand the current snapshot to the success callback.
    ///
    /// Refused while loading or while any field is invalid. On success the
    /// returned request is what the caller posts to the payment service.
    pub fn submit(&mut self) -> Result<PaymentRequest, SubmitError> {
        if self.loading {
            warn!(target: "checkout::form", form_id = %self.id, "submit refused while loading");
            return Err(SubmitError::Loading);
        }

        let snapshot = self.store.snapshot();
        let state = self.sync.refresh(&snapshot);

        if state.is_invalid {
            warn!(
                target: "checkout::form",
                form_id = %self.id,
                invalid_fields = state.errors.invalid_field_count(),
                "submit refused: form is invalid"
            );
            return Err(SubmitError::Invalid {
                errors: state.errors,
            });
        }

        let request = PaymentRequest::from_snapshot(&snapshot)?;
        info!(
            target: "checkout::form",
            form_id = %self.id,
            revision = snapshot.revision(),
            card = %mask_card_number(&request.card_number),
            "checkout submitted"
        );
        (self.on_success)(&snapshot);
        Ok(request)
    }

    /// Clear every field; validation follows
    pub fn reset(&mut self) {
        self.store.reset();
        self.loading = false;
    }
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("id", &self.id)
            .field("store", &self.store)
            .field("sync", &self.sync)
            .field("loading", &self.loading)
            .finish()
    }
}
