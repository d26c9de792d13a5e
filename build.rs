use shadow_rs::BuildPattern;
use shadow_rs::ShadowBuilder;

/// Exposes build metadata (`build::CLAP_LONG_VERSION`) to the CLI.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    ShadowBuilder::builder()
        .build_pattern(BuildPattern::Lazy)
        .deny_const(Default::default())
        .build()?;

    Ok(())
}
