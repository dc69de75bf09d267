use crate::domain::repository::{PendingRepository, PinRepository};
use crate::domain::types::now_ms;
use crate::error::AuthFlowError;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub pending_purged: u64,
    pub pins_purged: u64,
}

/// Lazy expiry sweeper: removes stale pending registrations and PINs.
///
/// Runs at the start of the sensitive flows rather than on a timer. Expiry is
/// also checked at use time, so a record that outlives the sweep is still
/// never accepted.
pub struct SweepExpiredUseCase<P, N>
where
    P: PendingRepository,
    N: PinRepository,
{
    pub pending: P,
    pub pins: N,
}

impl<P, N> SweepExpiredUseCase<P, N>
where
    P: PendingRepository,
    N: PinRepository,
{
    pub async fn execute(&self) -> Result<SweepReport, AuthFlowError> {
        let now = now_ms();
        let report = SweepReport {
            pending_purged: self.pending.purge_expired(now).await?,
            pins_purged: self.pins.purge_expired(now).await?,
        };
        if report.pending_purged > 0 || report.pins_purged > 0 {
            tracing::debug!(
                pending = report.pending_purged,
                pins = report.pins_purged,
                "purged expired records"
            );
        }
        Ok(report)
    }
}
