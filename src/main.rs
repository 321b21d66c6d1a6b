use relax::cli::Args;
use relax::grid::*;
use relax::solver::*;
use relax::RelaxError;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[cfg(feature = "profile-with-puffin")]
fn start_puffin_server() -> Option<puffin_http::Server> {
    let server_addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
    println!("Run this to view profiling data:  puffin_viewer {server_addr}");
    match puffin_http::Server::new(&server_addr) {
        Ok(server) => {
            profiling::puffin::set_scopes_on(true);
            Some(server)
        }
        Err(e) => {
            tracing::warn!("profiling server unavailable: {e}");
            None
        }
    }
}

fn run(args: &Args) -> relax::Result<()> {
    // Configuration problems are reported before any file is read.
    let parameters = args.solver_parameters()?;
    let size = args.size()?;
    let grid = args.seed_grid()?;

    let mut relaxation = Relaxation::new(&grid, parameters)?;
    if args.print_blocks {
        print_blocks(relaxation.grid(), &relaxation.block_ranges())
            .map_err(|e| RelaxError::io("<stdout>", e))?;
    }

    let report = relaxation.run()?;
    // size, threads, precision, seconds
    println!(
        "{}, {}, {}, {:.6}",
        size,
        parameters.threads,
        parameters.epsilon,
        report.elapsed.as_secs_f64()
    );

    let grid = relaxation.into_grid();
    if args.print {
        print_grid(&grid);
    }
    if let Some(output) = &args.output {
        write_grid(output, &grid)?;
    }
    if let Some(image) = &args.image {
        relax::image::write_heatmap(&grid, image)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let args = Args::cli_setup("relax");

    #[cfg(feature = "profile-with-puffin")]
    let _puffin_server = start_puffin_server();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
