// SPDX-License-Identifier: MPL-2.0
use drive_lens::app::{self, paths, Flags};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
DriveLens - photo viewer for a remote drive

USAGE:
  drive_lens [OPTIONS]

OPTIONS:
  -h, --help               Print this help and exit
      --lang <LOCALE>      Interface language (e.g. en-US, fr)
      --server <URL>       Listing service base URL
      --folder <ID>        Open this folder on the Albums screen
      --data-dir <DIR>     Directory for favorites
      --config-dir <DIR>   Directory for settings.toml

ENVIRONMENT:
  DRIVE_LENS_DATA_DIR      Same as --data-dir
  DRIVE_LENS_CONFIG_DIR    Same as --config-dir
  RUST_LOG                 Log filter (default: drive_lens=info)
";

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("drive_lens=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let flags = Flags {
        lang: optional_arg(&mut args, "--lang"),
        server: optional_arg(&mut args, "--server"),
        folder: optional_arg(&mut args, "--folder"),
    };
    let data_dir = optional_arg(&mut args, "--data-dir");
    let config_dir = optional_arg(&mut args, "--config-dir");

    let rest = args.finish();
    if !rest.is_empty() {
        tracing::warn!(?rest, "ignoring unexpected arguments");
    }

    paths::init_cli_overrides(data_dir, config_dir);
    app::run(flags)
}

fn optional_arg(args: &mut pico_args::Arguments, key: &'static str) -> Option<String> {
    match args.opt_value_from_str(key) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(key, %error, "ignoring invalid argument");
            None
        }
    }
}
