//! Error catalog for the assistant REST surface.

use modkit::api::ErrDef;

pub const ASSISTANT_NOT_CONFIGURED: ErrDef = ErrDef::new(
    503,
    "Assistant Not Configured",
    "ASSISTANT_NOT_CONFIGURED",
    "https://errors.chores.local/ASSISTANT_NOT_CONFIGURED",
);
pub const PROVIDER_FAILED: ErrDef = ErrDef::new(
    502,
    "Chat Provider Failed",
    "ASSISTANT_PROVIDER_FAILED",
    "https://errors.chores.local/ASSISTANT_PROVIDER_FAILED",
);
