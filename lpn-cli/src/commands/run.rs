//! `lpn run` command.

use anyhow::Result;
use clap::Args;
use lpn_core::database::DatabaseImage;
use lpn_core::liferay::PortalImage;
use lpn_core::stack::{self, RunOptions};

use super::Variant;

#[derive(Args)]
pub struct RunArgs {
    /// Portal flavor to run
    pub variant: Variant,

    /// Image tag; the flavor's default when omitted
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Host port bound to the portal HTTP port (8080)
    #[arg(long, default_value_t = 8080)]
    pub http_port: u16,

    /// Host port bound to the GoGo shell port (11311)
    #[arg(long, default_value_t = 11311)]
    pub gogo_shell_port: u16,

    /// Expose the JPDA debugger and enable debug mode
    #[arg(short, long)]
    pub debug: bool,

    /// Host port bound to the debugger port (9000)
    #[arg(long, default_value_t = 9000)]
    pub debug_port: u16,

    /// JVM options, e.g. "-Xmx1g -Xms1g"
    #[arg(short, long)]
    pub memory: Option<String>,

    /// Link the portal to a MySQL database container
    #[arg(long)]
    pub database: bool,

    /// Database image tag; the default when omitted
    #[arg(long)]
    pub database_tag: Option<String>,
}

pub async fn run(args: RunArgs) -> Result<()> {
    let manager = super::manager().await?;

    let portal = args.variant.into();
    let image = PortalImage::new(portal, args.tag.clone());
    let database = args
        .database
        .then(|| DatabaseImage::mysql(portal, args.database_tag.clone()));

    let options = RunOptions {
        http_port: args.http_port,
        gogo_shell_port: args.gogo_shell_port,
        debug: args.debug,
        debug_port: args.debug_port,
        memory: args.memory.clone(),
    };

    stack::run_portal(&manager, &image, database.as_ref(), &options).await?;

    println!(
        "The container [{}] is starting on http://localhost:{}",
        image.container_name(),
        args.http_port
    );
    Ok(())
}
