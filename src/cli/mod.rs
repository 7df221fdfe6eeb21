use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "matrimony-api")]
#[command(about = "Matrimony API - biodata catalog, favorites, premium upgrades and payments")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Listen port (overrides PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Use the in-process store instead of Postgres")]
    pub memory: bool,
}
