use std::error::Error;
use std::io;

use clap::Parser;
use colored::Colorize;
use persona_chat::{
    cli::Args, config::Config, errors::ChatError, openai::OpenAiClient, session::ChatSession,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let persona = args.persona();
    println!("{}", "AI Prompt:".bright_magenta());
    println!("{}", persona.bright_magenta());

    let res = Config::from_env_and_args(args).and_then(run);
    res.unwrap_or_else(|e| {
        report(&e);
        std::process::exit(1);
    });
}

fn run(config: Config) -> Result<(), ChatError> {
    let client = OpenAiClient::new(&config)?;
    let mut session = ChatSession::new(client, &config);
    let stdin = io::stdin();
    let path = session.run(&mut stdin.lock(), &mut io::stdout())?;
    log::info!("chat history saved to {}", path.display());
    Ok(())
}

fn report(e: &ChatError) {
    if e.is_config() {
        eprintln!("{}", e);
        if matches!(e, ChatError::MissingApiKey | ChatError::EmptyApiKey) {
            eprintln!("No API key set, terminating.");
        }
        return;
    }
    eprintln!("Well, this is embarrassing. I barfed :(... technical details follow");
    eprintln!("{}", e);
    let mut source = e.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
}
