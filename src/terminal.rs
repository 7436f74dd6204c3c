//! Line-oriented journal UI on stdin/stdout.

use std::io::Write;

use daily_diary::controller::{ActionOutcome, DiaryController, DisplayMode, Notice, NoticeKind, UiEffect};
use daily_diary::render::{CONFIRM_DELETE_PROMPT, EMPTY_STATE_TEXT};
use daily_diary::HttpBackend;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

const HELP: &str = "\
Type a line and press Enter to save it as an entry.
  /delete N   delete entry number N
  /new        start a new entry
  /calendar   filter entries by date
  /dark       toggle dark/light display
  /refresh    reload entries from the server
  /quit       leave";

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Send(String),
    Delete(usize),
    New,
    Calendar,
    Dark,
    Refresh,
    Quit,
    Help,
}

fn parse(line: &str) -> Input {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix('/') else {
        return Input::Send(line.to_string());
    };
    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("delete"), Some(n)) => n.parse().map(Input::Delete).unwrap_or(Input::Help),
        (Some("new"), None) => Input::New,
        (Some("calendar"), None) => Input::Calendar,
        (Some("dark"), None) => Input::Dark,
        (Some("refresh"), None) => Input::Refresh,
        (Some("quit" | "exit"), None) => Input::Quit,
        _ => Input::Help,
    }
}

type StdinLines = Lines<BufReader<Stdin>>;

pub async fn run<B: HttpBackend>(controller: DiaryController<B>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if let Err(notice) = controller.startup().await {
        show_notice(&notice, &mut lines).await?;
    }
    print_journal(&controller);

    loop {
        prompt("> ")?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse(&line) {
            Input::Send(text) => {
                let outcome = controller.send(&text).await;
                report(&outcome, &controller, &mut lines).await?;
            }
            Input::Delete(n) => {
                let view = controller.view();
                let Some(row) = n.checked_sub(1).and_then(|i| view.rows.get(i)) else {
                    println!("There is no entry #{n}.");
                    continue;
                };
                prompt(&format!("{CONFIRM_DELETE_PROMPT} [y/N] "))?;
                let answer = lines.next_line().await?.unwrap_or_default();
                let confirmed = matches!(answer.trim().to_lowercase().as_str(), "y" | "yes");

                let outcome = controller.delete(row.id, || confirmed).await;
                report(&outcome, &controller, &mut lines).await?;
            }
            Input::New => apply(controller.quick_compose(), &mut lines).await?,
            Input::Calendar => apply(controller.date_filter(), &mut lines).await?,
            Input::Dark => {
                controller.toggle_display_mode();
                print_journal(&controller);
            }
            Input::Refresh => {
                if let Err(notice) = controller.reload().await {
                    show_notice(&notice, &mut lines).await?;
                }
                print_journal(&controller);
            }
            Input::Help => println!("{HELP}"),
            Input::Quit => break,
        }
    }
    Ok(())
}

async fn report<B: HttpBackend>(
    outcome: &ActionOutcome,
    controller: &DiaryController<B>,
    lines: &mut StdinLines,
) -> anyhow::Result<()> {
    if let Some(notice) = outcome.notice() {
        show_notice(notice, lines).await?;
    }
    if let Some(notice) = outcome.skip_notice() {
        show_notice(&notice, lines).await?;
    }
    if outcome.committed() {
        print_journal(controller);
    }
    Ok(())
}

async fn apply(effect: UiEffect, lines: &mut StdinLines) -> anyhow::Result<()> {
    match effect {
        // the next prompt is the input field
        UiEffect::FocusInput => println!("New entry:"),
        UiEffect::Notify(notice) => show_notice(&notice, lines).await?,
    }
    Ok(())
}

async fn show_notice(notice: &Notice, lines: &mut StdinLines) -> anyhow::Result<()> {
    match notice.kind {
        NoticeKind::Transient => println!("! {}", notice.text),
        NoticeKind::Blocking => {
            println!("!! {}", notice.text);
            prompt("Press Enter to continue ")?;
            lines.next_line().await?;
        }
    }
    Ok(())
}

fn print_journal<B: HttpBackend>(controller: &DiaryController<B>) {
    let mode = controller.display_mode();
    let title = controller
        .session()
        .active_room()
        .map(|r| r.name)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "Diary".to_string());

    println!();
    println!("{} ({})", paint(mode, &title), controller.total_entries_label());

    let view = controller.view();
    if view.empty_state {
        println!("  {EMPTY_STATE_TEXT}");
        return;
    }
    for (i, row) in view.rows.iter().enumerate() {
        match &row.timestamp {
            Some(ts) => println!("{:>3}. {}  [{ts}]", i + 1, paint(mode, &row.content)),
            None => println!("{:>3}. {}", i + 1, paint(mode, &row.content)),
        }
    }
}

fn paint(mode: DisplayMode, text: &str) -> String {
    match mode {
        DisplayMode::Dark => format!("\x1b[97m{text}\x1b[0m"),
        DisplayMode::Light => format!("\x1b[30;47m{text}\x1b[0m"),
    }
}

fn prompt(text: &str) -> std::io::Result<()> {
    print!("{text}");
    std::io::stdout().flush()
}
