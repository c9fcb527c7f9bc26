use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::app::{self, RunConfig};
use crate::args::LoadArgs;
use crate::error::AppResult;
use crate::logger::{LogSettings, init_logging};

pub(crate) fn run() -> AppResult<()> {
    let matches = LoadArgs::command().get_matches();
    let mut args = LoadArgs::from_arg_matches(&matches)?;
    apply_config(&mut args, &matches)?;

    init_logging(&LogSettings::from_env(args.verbose));

    let config = RunConfig::from_args(&args)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(&config))
}

fn apply_config(args: &mut LoadArgs, matches: &ArgMatches) -> AppResult<()> {
    let loaded_config = crate::config::load_config(args.config.as_deref())?;
    if let Some(config) = loaded_config.as_ref() {
        crate::config::apply_config(args, matches, config)?;
    }
    Ok(())
}

async fn run_async(config: &RunConfig) -> AppResult<()> {
    app::print_lines(&app::parameter_lines(config));

    let outcome = app::run_load(config).await?;
    app::print_lines(&app::result_lines(&outcome.summary, outcome.elapsed));
    if outcome.interrupted {
        println!("  Interrupted: results cover requests completed before shutdown.");
    }

    if let Some(path) = config.output.as_deref() {
        app::export_json(path, &outcome.summary, &outcome.samples).await?;
        println!("{}", app::saved_line(path));
    }
    Ok(())
}
