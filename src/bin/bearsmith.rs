use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context as _;
use bearsmith::{
    BearOutcome, BearPipeline, BearRequest, Bundle, Category, MemberRequest, MemberResolver,
    Resolution, Settings, SettingsOverrides, missing_report,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bearsmith", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve `GET /bear/{head}/{body}/{leg}` over HTTP.
    Serve(ServeArgs),
    /// Compose one bear into a JPEG file.
    Compose(ComposeArgs),
    /// Report which tier holds a member.
    Resolve(ResolveArgs),
    /// List the members compiled into the binary.
    Members(MembersArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// JSON settings file.
    #[arg(long, env = "BEARSMITH_CONFIG")]
    config: Option<PathBuf>,

    /// Secondary search directory (empty means the working directory).
    #[arg(long, env = "BEARSMITH_DIRECTORY")]
    directory: Option<PathBuf>,

    /// JPEG quality of the composed bear (1-100).
    #[arg(long, env = "BEARSMITH_JPEG_QUALITY")]
    jpeg_quality: Option<u8>,

    /// Log filter, e.g. `info` or `bearsmith=debug`.
    #[arg(long, env = "BEARSMITH_LOG")]
    log: Option<String>,
}

#[derive(Parser, Debug)]
struct ServeArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Listen address.
    #[arg(long, env = "BEARSMITH_BIND")]
    bind: Option<SocketAddr>,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Head member name.
    head: String,
    /// Body member name.
    body: String,
    /// Leg member name.
    leg: String,

    /// Output JPEG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Member category.
    #[arg(value_enum)]
    category: CategoryChoice,
    /// Member name (without `.jpg`).
    name: String,
}

#[derive(Parser, Debug)]
struct MembersArgs {
    /// Only list this category.
    #[arg(value_enum)]
    category: Option<CategoryChoice>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CategoryChoice {
    Heads,
    Bodies,
    Legs,
}

impl From<CategoryChoice> for Category {
    fn from(c: CategoryChoice) -> Self {
        match c {
            CategoryChoice::Heads => Category::Heads,
            CategoryChoice::Bodies => Category::Bodies,
            CategoryChoice::Legs => Category::Legs,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Serve(args) => cmd_serve(args),
        Command::Compose(args) => cmd_compose(args),
        Command::Resolve(args) => cmd_resolve(args),
        Command::Members(args) => cmd_members(args),
    }
}

fn load_settings(common: &CommonArgs, bind: Option<SocketAddr>) -> anyhow::Result<Settings> {
    let overrides = SettingsOverrides {
        bind,
        directory: common.directory.clone(),
        jpeg_quality: common.jpeg_quality,
        log: common.log.clone(),
    };
    let settings = Settings::load(common.config.as_deref(), overrides)?;
    init_tracing(&settings.log)?;
    Ok(settings)
}

fn init_tracing(filter: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(filter).with_context(|| format!("parse log filter '{filter}'"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn make_pipeline(settings: &Settings) -> anyhow::Result<BearPipeline> {
    let working_dir = std::env::current_dir().context("read current working directory")?;
    let base_dir = settings.base_dir(&working_dir);
    tracing::info!(
        working_dir = %working_dir.display(),
        base_dir = %base_dir.display(),
        "member search roots"
    );
    let resolver = MemberResolver::new(working_dir, base_dir, Bundle::embedded());
    Ok(BearPipeline::new(resolver).with_jpeg_quality(settings.jpeg_quality))
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<ExitCode> {
    let settings = load_settings(&args.common, args.bind)?;
    let pipeline = make_pipeline(&settings)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;
    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(settings.bind)
            .await
            .with_context(|| format!("bind {}", settings.bind))?;
        tracing::info!("listening on http://{}", listener.local_addr()?);
        bearsmith::server::serve(listener, pipeline).await
    })?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<ExitCode> {
    let settings = load_settings(&args.common, None)?;
    let pipeline = make_pipeline(&settings)?;

    let req = BearRequest::new(args.head, args.body, args.leg);
    let bear = match pipeline.build(&req)? {
        BearOutcome::Composed(bear) => bear,
        BearOutcome::Missing(misses) => {
            eprintln!("{}", missing_report(&misses));
            return Ok(ExitCode::from(2));
        }
    };

    ensure_parent_dir(&args.out)?;
    std::fs::write(&args.out, &bear.jpeg)
        .with_context(|| format!("write jpeg '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({}x{})",
        args.out.display(),
        bear.width,
        bear.height
    );
    Ok(ExitCode::SUCCESS)
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<ExitCode> {
    let settings = load_settings(&args.common, None)?;
    let pipeline = make_pipeline(&settings)?;

    let member = MemberRequest::new(args.category.into(), args.name);
    match pipeline.resolver().resolve(&member)? {
        Resolution::Found(found) => {
            println!(
                "{member}: {} ({}x{}) from {}",
                found.tier,
                found.image.width(),
                found.image.height(),
                found.location
            );
            Ok(ExitCode::SUCCESS)
        }
        Resolution::NotFound(misses) => {
            eprintln!("{misses}");
            Ok(ExitCode::from(2))
        }
    }
}

fn cmd_members(args: MembersArgs) -> anyhow::Result<ExitCode> {
    let bundle = Bundle::embedded();
    let categories = match args.category {
        Some(c) => vec![Category::from(c)],
        None => Category::ALL.to_vec(),
    };
    for category in categories {
        for name in bundle.names(category) {
            println!("{}", MemberRequest::new(category, name));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
