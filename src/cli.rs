use clap::{Command, arg, crate_version};

pub fn cli() -> Command {
    Command::new("iwtui")
        .about("TUI for managing WiFi through the iwd daemon")
        .version(crate_version!())
        .arg(
            arg!(--mode <mode>)
                .short('m')
                .required(false)
                .help("Device mode")
                .value_parser(["station", "ap"]),
        )
}
