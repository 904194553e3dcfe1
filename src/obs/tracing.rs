// self
use crate::{_prelude::*, oauth::GrantType, obs::FetcherKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// A span builder used by fetchers and the grant client.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a fetch span tagged with the fetcher kind + stage.
	pub fn fetch(kind: FetcherKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::info_span!("commerce_broker.fetch", fetcher = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Creates a token exchange span tagged with the grant type.
	pub fn grant(grant: GrantType) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("commerce_broker.grant", grant = grant.as_str());

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = grant;

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn flow_span_builds_without_subscriber() {
		let _fetch = FlowSpan::fetch(FetcherKind::Middleware, "test");
		let _grant = FlowSpan::grant(GrantType::ClientCredentials);
	}

	#[tokio::test]
	async fn instrument_passes_output_through() {
		let span = FlowSpan::fetch(FetcherKind::User, "instrument_passes_output_through");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
