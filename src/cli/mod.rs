// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and routes each subcommand to its
// use case. Printing happens here and nowhere else.

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, HistoryArgs, PeekArgs, PrepareArgs};

use crate::application::peek_use_case::PeekedWindow;

#[derive(Parser, Debug)]
#[command(
    name = "lm-reader",
    version,
    about = "Build vocabularies and mini-batches from paired language-model corpora."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Prepare(args) => run_prepare(args),
            Commands::Peek(args)    => run_peek(args),
            Commands::History(args) => run_history(args),
        }
    }
}

fn run_prepare(args: PrepareArgs) -> Result<()> {
    use crate::application::prepare_use_case::PrepareUseCase;

    let report = PrepareUseCase::new(args.into()).execute()?;
    let m = &report.manifest;

    println!("vocab_size: {}", m.vocab_size);
    println!("labels:     {}", m.labels_path);
    for split in &report.splits {
        match &split.epoch_size {
            Ok(n)  => println!("{:<6} {:>10} ids  epoch_size={}", split.split, split.ids, n),
            Err(e) => println!("{:<6} {:>10} ids  {}", split.split, split.ids, e),
        }
    }
    Ok(())
}

fn run_peek(args: PeekArgs) -> Result<()> {
    use crate::application::peek_use_case::PeekUseCase;

    let report = PeekUseCase::new(args.into()).execute()?;
    println!("epoch_size={}", report.epoch_size);

    for window in &report.windows {
        println!("\nwindow {}", window.index);
        for (x, y) in window.inputs.iter().zip(&window.targets) {
            println!("  x: {:?}", x);
            println!("  y: {:?}", y);
            println!("     {} => {}",
                PeekedWindow::render_row(x, &report.vocab),
                PeekedWindow::render_row(y, &report.vocab));
        }
    }
    Ok(())
}

fn run_history(args: HistoryArgs) -> Result<()> {
    use crate::application::history_use_case::HistoryUseCase;

    let use_case = HistoryUseCase::new(&args.labels)?;
    let ids      = use_case.encode(&args.text)?;
    println!("{:?}", ids);
    Ok(())
}
