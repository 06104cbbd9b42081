use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::nutrition::{self, Biometrics};

use super::repo::{self, Profile};

/// The `ensure_targets` collaborator: returns the user's profile with
/// derived targets present whenever the biometrics allow it.
///
/// Creates an empty profile for unknown users. When any derived field is
/// missing, targets are recomputed and persisted as one unit; if the
/// biometrics are insufficient the profile comes back with targets still
/// null — never an error. Downstream defaults those to zero.
pub async fn ensure_targets(db: &PgPool, user_id: Uuid) -> anyhow::Result<Profile> {
    let profile = repo::find_or_create(db, user_id).await?;
    if profile.has_targets() {
        return Ok(profile);
    }

    match nutrition::derive_targets(&profile.biometrics()) {
        Some(targets) => {
            debug!(%user_id, tdee = targets.tdee, calories = targets.calories, "targets derived");
            repo::save_targets(db, user_id, &targets).await
        }
        None => {
            debug!(%user_id, "biometrics insufficient, leaving targets unset");
            Ok(profile)
        }
    }
}

/// The `invalidate_targets` collaborator: clears all derived fields so the
/// next read recomputes them. Called after every biometric edit; keeping
/// recomputation lazy means a multi-field edit derives only once.
pub async fn invalidate_targets(db: &PgPool, user_id: Uuid) -> anyhow::Result<()> {
    repo::clear_targets(db, user_id).await
}

/// Applies a biometric edit and returns the profile with freshly derived
/// targets (or untouched nulls when underivable).
pub async fn update_biometrics(
    db: &PgPool,
    user_id: Uuid,
    biometrics: &Biometrics,
) -> anyhow::Result<Profile> {
    repo::upsert_biometrics(db, user_id, biometrics).await?;
    invalidate_targets(db, user_id).await?;
    ensure_targets(db, user_id).await
}
