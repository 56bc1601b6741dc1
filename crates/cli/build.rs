use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("kawaraban")
        .version("0.3.0")
        .author("Kawaraban Contributors")
        .about("Scrape announcement pages into RSS and CSV")
        .arg(clap::arg!(<TARGET> "Target URL, 'all' for every configured target, a local HTML file, or '-' for stdin"))
        .arg(clap::arg!(--since <DATE> "Keep only items published on or after this date (YYYY-MM-DD)"))
        .arg(clap::arg!(--until <DATE> "Keep only items published on or before this date (YYYY-MM-DD)"))
        .arg(clap::arg!(--category <NAME> "Keep only items carrying this category"))
        .arg(clap::arg!(--"exclude-category" <NAME> "Drop items carrying this category"))
        .arg(
            clap::arg!(--"feed-output" <FILE> "Feed output path")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(--"csv-output" <FILE> "CSV output path")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--"diff-mode" "Only emit items newer than the latest date in the existing feed"))
        .arg(clap::arg!(--"with-date" "Append the run date to default output filenames"))
        .arg(clap::arg!(--"base-url" <URL> "Base URL for resolving links when reading a file or stdin"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"))
        .arg(clap::arg!(--silent "Suppress all output except the exit code"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "kawaraban", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "kawaraban", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "kawaraban", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "kawaraban", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
