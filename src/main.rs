use anyhow::Result;

fn main() -> Result<()> {
    explore_index::cli::commands::run()
}
