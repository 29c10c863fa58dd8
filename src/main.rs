use miette::Result;

/// Main entry point for the web-depcruiser CLI tool
fn main() -> Result<()> {
    miette::set_panic_hook();

    web_depcruiser::run()
}
