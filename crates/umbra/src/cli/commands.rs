use anyhow::{Context as _, Result};
use console::style;
use tabled::Tabled;
use umbra::{Context, FsResolver, Options, Resolve, ZoneInfo};
use umbra_platform::HostInfo;

use super::app::ResolveArg;
use super::table::{FormatConfig, Formatter};

pub fn mirror(options: &Options) -> Result<()> {
    let report = umbra::run(options).context("mirror pass failed")?;
    println!("{} {report}", style("Mirrored").green().bold());
    Ok(())
}

pub fn rebuild(options: &Options) -> Result<()> {
    let report = umbra::rebuild(options).context("rebuild failed")?;
    println!("{} {report}", style("Rebuilt").green().bold());
    Ok(())
}

pub fn resolve(arg: &ResolveArg, options: &Options) -> Result<()> {
    let host = FsResolver::new().layout(options.layout.clone());
    let resolver = umbra::configure(options, host)?;
    let source = resolver.zones().source().to_path_buf();

    let from = match &arg.from {
        Some(path) => std::path::absolute(path).with_context(|| format!("invalid path {}", path.display()))?,
        None => source.clone(),
    };
    let ctx = if from.is_file() {
        Context::from_file(&from)
    } else {
        Context::from_dir(&from)
    };
    let stop = if ctx.dir.starts_with(&source) {
        source
    } else {
        ctx.dir.ancestors().last().map(|p| p.to_path_buf()).unwrap_or_default()
    };
    let search_paths = options.layout.search_paths(&ctx.dir, &stop);
    let ctx = ctx.with_search_paths(search_paths);

    let path = resolver
        .resolve(&arg.request.as_str().into(), &ctx)
        .with_context(|| format!("cannot resolve '{}'", arg.request))?;
    println!("{}", path.display());
    Ok(())
}

#[derive(Tabled)]
struct ZoneRow {
    #[tabled(rename = "TAG")]
    tag:  String,
    #[tabled(rename = "LIVE")]
    live: &'static str,
    #[tabled(rename = "PATH")]
    path: String,
}

impl From<ZoneInfo> for ZoneRow {
    fn from(zone: ZoneInfo) -> Self {
        Self {
            tag:  zone.tag,
            live: if zone.live { "*" } else { "" },
            path: zone.path.display().to_string(),
        }
    }
}

pub fn zones(options: &Options) -> Result<()> {
    let zones = umbra::zones(options)?;
    if zones.is_empty() {
        println!("{}", style("No binary zones").dim());
        return Ok(());
    }
    let rows: Vec<ZoneRow> = zones.into_iter().map(Into::into).collect();
    let config = FormatConfig {
        footer: Some(format!("{} zone(s)", rows.len())),
        ..Default::default()
    };
    println!("{}", Formatter::render(rows, config));
    Ok(())
}

#[derive(Tabled)]
struct Field {
    #[tabled(rename = "KEY")]
    key:   &'static str,
    #[tabled(rename = "VALUE")]
    value: String,
}

fn field(key: &'static str, value: Option<&str>) -> Field {
    Field {
        key,
        value: value.unwrap_or("-").to_string(),
    }
}

pub fn info(options: &Options) -> Result<()> {
    let host = HostInfo::current();
    let tag = options.tag().map(|t| t.to_string());
    let source = options.source()?.display().to_string();
    let shadow = options.shadow()?.display().to_string();

    let rows = vec![
        field("os", host.name.as_deref()),
        field("os version", host.os_version.as_deref()),
        field("kernel", host.kernel_version.as_deref()),
        field("cpu arch", Some(host.cpu_arch.as_str())),
        field("host", host.host_name.as_deref()),
        field("platform tag", tag.as_deref().ok()),
        field("source", Some(source.as_str())),
        field("shadow", Some(shadow.as_str())),
    ];
    let config = FormatConfig {
        header: Some("Host".into()),
        ..Default::default()
    };
    println!("{}", Formatter::render(rows, config));

    if let Err(e) = tag {
        println!("{} {e}", style("Runtime:").yellow());
    }

    let effective = toml::to_string_pretty(options).context("failed to render configuration")?;
    println!("\n{}\n{effective}", style("Configuration").bold());
    Ok(())
}
