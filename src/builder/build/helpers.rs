use super::super::state::BuilderState;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

pub(super) fn log_builder_state(state: &BuilderState) {
    log::debug!(
        "Building chat provider. backend={:?} model={:?} temp={:?} max_tokens={:?} resilient={:?}",
        state.backend,
        state.model,
        state.temperature,
        state.max_tokens,
        state.resilient_enable,
    );
}

pub(super) fn timeout_or_default(state: &BuilderState) -> Option<u64> {
    Some(state.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
}
