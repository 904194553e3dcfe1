// self
use crate::{
	oauth::GrantType,
	obs::{CacheOutcome, FetcherKind, FlowOutcome},
};

/// Records a fetch outcome via the global metrics recorder (when enabled).
pub fn record_fetch_outcome(kind: FetcherKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"commerce_broker_fetch_total",
			"fetcher" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records a token exchange outcome via the global metrics recorder (when enabled).
pub fn record_grant_outcome(grant: GrantType, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"commerce_broker_grant_total",
			"grant" => grant.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (grant, outcome);
	}
}

/// Records how the buyer strategy resolved its token (when enabled).
pub fn record_cache_lookup(outcome: CacheOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("commerce_broker_cache_total", "outcome" => outcome.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recorders_noop_without_metrics() {
		record_fetch_outcome(FetcherKind::Buyer, FlowOutcome::Failure);
		record_grant_outcome(GrantType::Password, FlowOutcome::Attempt);
		record_cache_lookup(CacheOutcome::Hit);
	}
}
