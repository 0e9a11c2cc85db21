use clap::Parser;

fn main() -> anyhow::Result<()> {
    lecarnet::cli::Cli::parse().run()
}
