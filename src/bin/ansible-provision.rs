use ansible_provision::cli::{print_plan, ProvisionCli};
use ansible_provision::Provisioner;
use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = ProvisionCli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();

    info!("Starting ansible-provision v{}", env!("CARGO_PKG_VERSION"));

    let build = cli.build_info();
    let config = cli.provision_config();
    let paths = cli.staging_paths();
    debug!("Staging paths: {:?}", paths);

    let mut provisioner = Provisioner::new(paths, cli.ansible_bin.clone());

    if cli.dry_run {
        let plan = provisioner.plan(&build, &config);
        print_plan(&plan, cli.format)?;
        return Ok(());
    }

    provisioner.run(&build, &config).await?;
    Ok(())
}
