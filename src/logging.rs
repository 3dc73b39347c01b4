use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber: `RUST_LOG` plus `homecare_site=info`.
///
/// Safe to call more than once; only the first call installs anything.
/// Returns whether this call did.
pub fn init() -> bool {
    let directive = match "homecare_site=info".parse::<Directive>() {
        Ok(directive) => directive,
        Err(_) => return false,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .try_init()
        .is_ok()
}
