use anyhow::Result;
use clap::Parser;

use bump_and_release::commands::ShellRunner;
use bump_and_release::config::{ReleaseConfig, CONFIG_FILE_NAME};
use bump_and_release::context::CiContext;
use bump_and_release::docs::GhPagesCli;
use bump_and_release::git::Git2Client;
use bump_and_release::manifest::PackageManifest;
use bump_and_release::orchestration::{run_release, ReleaseReport, ReleaseRequest};
use bump_and_release::registry::NpmRegistry;
use bump_and_release::ui;

#[derive(clap::Parser)]
#[command(
    name = "bump-and-release",
    about = "Bump the version, tag, publish and deploy from CI"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Skip bump, changelog, publish and push steps")]
    skip_bump: bool,

    #[arg(long, help = "Skip the docs/demo deployment")]
    skip_docs: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("bump-and-release {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let ctx = match CiContext::from_env() {
        Ok(ctx) => ctx,
        Err(e) => {
            ui::display_error(&format!("Cannot read CI environment: {}", e));
            std::process::exit(1);
        }
    };

    let config_path = match &args.config {
        Some(path) => ctx.workspace.join(path),
        None => ctx.workspace.join(CONFIG_FILE_NAME),
    };
    let config = match ReleaseConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let manifest = match PackageManifest::load(&ctx.workspace.join("package.json")) {
        Ok(manifest) => manifest,
        Err(e) => {
            ui::display_error(&format!("Error loading package manifest: {}", e));
            std::process::exit(1);
        }
    };

    ui::display_status(&format!("bump-and-release: {}", manifest.name));
    ui::display_status(&format!("running on branch: {}", ctx.branch));

    let git = match Git2Client::open(&ctx.workspace) {
        Ok(git) => git,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };
    let registry = match NpmRegistry::new(ctx.registry_url.clone()) {
        Ok(registry) => registry,
        Err(e) => {
            ui::display_error(&format!("Registry client error: {}", e));
            std::process::exit(1);
        }
    };
    let runner = ShellRunner;
    let pages = GhPagesCli::new(&runner);

    let request = ReleaseRequest {
        ctx: &ctx,
        config: &config,
        manifest: &manifest,
        skip_bump: args.skip_bump,
        skip_docs: args.skip_docs,
    };

    match run_release(&request, &git, &registry, &runner, &pages) {
        Ok(ReleaseReport::NotConfigured) => {
            ui::display_success("Nothing to do: branch not configured.");
        }
        Ok(ReleaseReport::AlreadyReleased) => {
            ui::display_success("Nothing to do: already released.");
        }
        Ok(ReleaseReport::PrepublishOnly) => {
            ui::display_success("Bump skipped; prepublish commands completed.");
        }
        Ok(ReleaseReport::Released { version }) => {
            ui::display_success(&format!("Released version {}", version));
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }

    Ok(())
}
