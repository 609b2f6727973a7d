// Command-line interface for the AMLCO report generator
//
// Two jobs: converting report content between the editor's plain text and report markup
// (offline, through amlco-content), and driving the backend workflows (through amlco-client).
//
// Usage:
//  amlco <input> --to <format> [--from <format>] [-o <file>]   - Convert (default command)
//  amlco convert <input> --to <format> ...                      - Same as above (explicit)
//  amlco upload <file>...                                       - Upload data files, remember the spreadsheet
//  amlco upload --source <file>...                              - Upload source files and list parsed sections
//  amlco generate                                               - Generate a report from the remembered spreadsheet
//  amlco reports / show / edit / delete / download              - Work with existing reports
//
// Backend address comes from the config file ([api] base_url), --api-base or AMLCO_API_BASE.
// Every failure prints `Error: <message>` on stderr and exits with status 1.

use amlco_client::types::{CreateReport, ParsedSection, ReportSection};
use amlco_client::{
    format_bytes, generate_report, ApiClient, FileStore, HttpTransport, ReportBoard,
    ReportEditor, ReportStatus, SourceSession, UploadFile, UploadQueue, UploadState,
};
use amlco_config::{AmlcoConfig, Loader};
use amlco_content::{FormatRegistry, HtmlOptions};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

const SUBCOMMANDS: &[&str] = &[
    "convert",
    "upload",
    "sections",
    "create",
    "generate",
    "reports",
    "show",
    "edit",
    "delete",
    "download",
    "status-label",
    "list-formats",
    "help",
];

fn build_cli() -> Command {
    Command::new("amlco")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert report content and drive the AMLCO report generator")
        .long_about(
            "amlco works with AMLCO annual report content.\n\n\
            Commands:\n  \
            - convert: plain text <-> report markup, offline\n  \
            - upload, create, generate: build a report on the backend\n  \
            - reports, show, edit, delete, download: work with existing reports\n\n\
            Examples:\n  \
            amlco notes.txt --to html                 # Text to report markup (stdout)\n  \
            amlco upload clients.xlsx policy.pdf      # Upload data files\n  \
            amlco generate                            # Generate from the uploaded spreadsheet\n  \
            amlco download <id> -o reports/           # Save the .docx",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an amlco.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("api-base")
                .long("api-base")
                .value_name("URL")
                .env("AMLCO_API_BASE")
                .help("Backend base URL (overrides [api] base_url)")
                .value_hint(ValueHint::Url)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between text and report markup (default command)")
                .long_about(
                    "Convert report content between formats.\n\n\
                    Supported formats:\n  \
                    - text: editor plain text (.txt)\n  \
                    - html: report markup (.html)\n\n\
                    Text lines starting with '# ', '## ', '### ' become headings, as do\n\
                    all-caps lines and numbered lines like '3.2 Scope'.\n\
                    The source format is auto-detected from the file extension.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("escape-text")
                        .long("escape-text")
                        .help("Escape &, < and > in text when writing html")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("upload")
                .about("Upload files to the backend")
                .long_about(
                    "Upload files to the backend.\n\n\
                    By default files are data files: .xlsx workbooks go to the spreadsheet\n\
                    endpoint and the most recent one is remembered for 'generate'; anything\n\
                    else is uploaded as a supporting document.\n\n\
                    --source uploads source files to be parsed into sections.\n\
                    --annual-report uploads last year's annual report.",
                )
                .arg(
                    Arg::new("files")
                        .help("Files to upload")
                        .required(true)
                        .num_args(1..)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("source")
                        .long("source")
                        .help("Upload as source files and list the parsed sections")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("annual-report"),
                )
                .arg(
                    Arg::new("annual-report")
                        .long("annual-report")
                        .help("Upload as the previous annual report")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("sections").about("List the report template's sections"))
        .subcommand(
            Command::new("create")
                .about("Create a report")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .help("Report type (defaults to [report] report_type)"),
                )
                .arg(Arg::new("excel-id").long("excel-id").help("Spreadsheet id"))
                .arg(Arg::new("source-id").long("source-id").help("Source file id"))
                .arg(
                    Arg::new("annual-report-id")
                        .long("annual-report-id")
                        .help("Annual report id"),
                )
                .arg(
                    Arg::new("sections")
                        .long("sections")
                        .value_name("PATH")
                        .help("JSON file with the sections array")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("generate")
                        .long("generate")
                        .help("Generate the content right away")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("generate")
                .about("Generate a report from the most recently uploaded spreadsheet")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .help("Report type (defaults to [report] report_type)"),
                ),
        )
        .subcommand(
            Command::new("reports").about("List reports").arg(
                Arg::new("query")
                    .long("query")
                    .short('q')
                    .help("Only show reports whose title contains this text"),
            ),
        )
        .subcommand(
            Command::new("show")
                .about("Print a report")
                .arg(Arg::new("id").help("Report id").required(true).index(1))
                .arg(
                    Arg::new("text")
                        .long("text")
                        .help("Print the editable text instead of the markup")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("edit")
                .about("Replace a report's content with the text of a file")
                .arg(Arg::new("id").help("Report id").required(true).index(1))
                .arg(
                    Arg::new("text-file")
                        .help("Plain text file with the new content")
                        .required(true)
                        .index(2)
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a report")
                .arg(Arg::new("id").help("Report id").required(true).index(1)),
        )
        .subcommand(
            Command::new("download")
                .about("Download a report as .docx")
                .arg(Arg::new("id").help("Report id").required(true).index(1))
                .arg(
                    Arg::new("output-dir")
                        .long("output-dir")
                        .short('o')
                        .help("Directory to save into (defaults to the current directory)")
                        .value_hint(ValueHint::DirPath),
                ),
        )
        .subcommand(
            Command::new("status-label")
                .about("Print the display label for a status code")
                .arg(Arg::new("code").help("Status code, e.g. 'done'").index(1)),
        )
        .subcommand(Command::new("list-formats").about("List conversion formats"))
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    // No subcommand given: treat the first argument as a file to convert
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            if should_inject_convert(&args) {
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        matches.get_one::<String>("api-base").map(|s| s.as_str()),
    );

    match matches.subcommand() {
        Some(("convert", sub)) => handle_convert_command(sub, &config),
        Some(("upload", sub)) => {
            let files: Vec<&String> = sub
                .get_many::<String>("files")
                .map(|values| values.collect())
                .unwrap_or_default();
            if sub.get_flag("source") {
                handle_upload_source_command(&files, &config);
            } else if sub.get_flag("annual-report") {
                handle_upload_annual_report_command(&files, &config);
            } else {
                handle_upload_command(&files, &config);
            }
        }
        Some(("sections", _)) => handle_sections_command(&config),
        Some(("create", sub)) => handle_create_command(sub, &config),
        Some(("generate", sub)) => {
            let report_type = sub
                .get_one::<String>("type")
                .cloned()
                .unwrap_or_else(|| config.report.report_type.clone());
            handle_generate_command(&report_type, &config);
        }
        Some(("reports", sub)) => {
            let query = sub.get_one::<String>("query").map(|s| s.as_str());
            handle_reports_command(query, &config);
        }
        Some(("show", sub)) => {
            handle_show_command(required(sub, "id"), sub.get_flag("text"), &config);
        }
        Some(("edit", sub)) => {
            handle_edit_command(required(sub, "id"), required(sub, "text-file"), &config);
        }
        Some(("delete", sub)) => handle_delete_command(required(sub, "id"), &config),
        Some(("download", sub)) => {
            let dir = sub
                .get_one::<String>("output-dir")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            handle_download_command(required(sub, "id"), &dir, &config);
        }
        Some(("status-label", sub)) => {
            let code = sub.get_one::<String>("code").map(|s| s.as_str());
            println!("{}", ReportStatus::from_code(code));
        }
        Some(("list-formats", _)) => handle_list_formats_command(),
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn should_inject_convert(args: &[String]) -> bool {
    args.len() > 1 && !args[1].starts_with('-') && !SUBCOMMANDS.contains(&args[1].as_str())
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    match matches.get_one::<String>(name) {
        Some(value) => value.as_str(),
        None => fail(format!("missing argument '{name}'")),
    }
}

fn fail(message: impl Display) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

fn load_cli_config(explicit_path: Option<&str>, api_base: Option<&str>) -> AmlcoConfig {
    let loader = Loader::new().with_optional_file("amlco.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    let loader = match api_base {
        Some(base) => loader
            .set_override("api.base_url", base.to_string())
            .unwrap_or_else(|err| fail(format!("Failed to load configuration: {err}"))),
        None => loader,
    };

    loader
        .build()
        .unwrap_or_else(|err| fail(format!("Failed to load configuration: {err}")))
}

fn client(config: &AmlcoConfig) -> ApiClient<HttpTransport> {
    log::debug!("using backend at {}", config.api.base_url);
    ApiClient::from_config(&config.api).unwrap_or_else(|e| fail(e))
}

fn open_store(config: &AmlcoConfig) -> FileStore {
    let path = config
        .store
        .explicit_path()
        .unwrap_or_else(FileStore::default_path);
    FileStore::open(path).unwrap_or_else(|e| fail(e))
}

fn open_editor(client: &ApiClient<HttpTransport>, id: &str, config: &AmlcoConfig) -> ReportEditor {
    let mut editor = ReportEditor::new(id)
        .with_default_title(config.report.default_title.clone())
        .with_html_options(HtmlOptions::from(&config.convert.html));
    editor.refresh(client).unwrap_or_else(|e| fail(e));
    editor
}

fn read_upload(path: &str) -> UploadFile {
    UploadFile::from_path(path)
        .unwrap_or_else(|e| fail(format!("Error reading file '{path}': {e}")))
}

/// Handle the convert command
fn handle_convert_command(matches: &ArgMatches, config: &AmlcoConfig) {
    let input = required(matches, "input");
    let to = required(matches, "to");
    let registry = FormatRegistry::default();

    // Auto-detect --from if not provided
    let from = match matches.get_one::<String>("from") {
        Some(from) => from.clone(),
        None => registry
            .detect_format_from_filename(input)
            .unwrap_or_else(|| {
                fail(format!(
                    "Could not detect format from filename '{input}'. Please specify --from explicitly"
                ))
            }),
    };

    if let Err(e) = registry.get(&from) {
        fail(e);
    }
    if let Err(e) = registry.get(to) {
        fail(e);
    }

    let source = fs::read_to_string(input)
        .unwrap_or_else(|e| fail(format!("Error reading file '{input}': {e}")));

    let mut options = HashMap::new();
    if to == "html" {
        let configured = HtmlOptions::from(&config.convert.html);
        let escape = configured.escape_text || matches.get_flag("escape-text");
        options.insert("escape-text".to_string(), escape.to_string());
    }

    let result = registry
        .convert(&source, &from, to, &options)
        .unwrap_or_else(|e| fail(e));

    match matches.get_one::<String>("output") {
        Some(path) => fs::write(path, result)
            .unwrap_or_else(|e| fail(format!("Error writing file '{path}': {e}"))),
        None => println!("{result}"),
    }
}

/// Upload data files through the queue, remembering the spreadsheet id
fn handle_upload_command(files: &[&String], config: &AmlcoConfig) {
    let uploads: Vec<UploadFile> = files.iter().map(|path| read_upload(path)).collect();
    let client = client(config);
    let mut store = open_store(config);
    let mut queue = UploadQueue::new();

    let stored = queue.upload_all(&client, &mut store, uploads);

    let mut failed = 0;
    for item in queue.items() {
        let size = format_bytes(item.size);
        match &item.state {
            UploadState::Uploaded => println!(
                "uploaded  {}  ({size})  id={}",
                item.file_name,
                item.server_id.as_deref().unwrap_or("")
            ),
            UploadState::Error(message) => {
                failed += 1;
                eprintln!("failed    {}  ({size})  {message}", item.file_name);
            }
            UploadState::Uploading => {}
        }
    }
    if let Err(e) = stored {
        fail(e);
    }
    if failed > 0 {
        fail(format!("{failed} of {} uploads failed", queue.len()));
    }
}

fn handle_upload_source_command(files: &[&String], config: &AmlcoConfig) {
    let client = client(config);
    let mut session = SourceSession::new(config.report.report_type.clone());

    for path in files {
        session
            .upload_source(&client, read_upload(path))
            .unwrap_or_else(|e| fail(e));
        println!("{path}: {}", session.status());
    }

    for (index, section) in session.sections().iter().enumerate() {
        println!("{:>3}. {}", index + 1, section.display_title(index));
    }
    if let Some(id) = session.latest_source_id() {
        println!("source_id={id}");
    }
}

fn handle_upload_annual_report_command(files: &[&String], config: &AmlcoConfig) {
    let client = client(config);
    for path in files {
        let uploaded = client
            .upload_annual_report(read_upload(path))
            .unwrap_or_else(|e| fail(e));
        println!(
            "{path}: annual_report_id={}",
            uploaded.annual_report_id.as_deref().unwrap_or("")
        );
    }
}

fn handle_sections_command(config: &AmlcoConfig) {
    let names = client(config)
        .template_sections()
        .unwrap_or_else(|e| fail(e));
    for name in names {
        println!("{name}");
    }
}

fn handle_create_command(matches: &ArgMatches, config: &AmlcoConfig) {
    let report_type = matches
        .get_one::<String>("type")
        .cloned()
        .unwrap_or_else(|| config.report.report_type.clone());
    let mut request = CreateReport::new(report_type);
    request.excel_id = matches.get_one::<String>("excel-id").cloned();
    request.source_id = matches.get_one::<String>("source-id").cloned();
    request.annual_report_id = matches.get_one::<String>("annual-report-id").cloned();
    request.generate_now = matches.get_flag("generate");

    if let Some(path) = matches.get_one::<String>("sections") {
        request.sections = read_sections(Path::new(path))
            .into_iter()
            .map(ReportSection::Parsed)
            .collect();
    }

    let created = client(config)
        .create_report(&request)
        .unwrap_or_else(|e| fail(e));
    match created.report_id {
        Some(id) => println!("{id}"),
        None => fail("Report created, but no report ID returned."),
    }
}

fn read_sections(path: &Path) -> Vec<ParsedSection> {
    let raw = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("Error reading file '{}': {e}", path.display())));
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        fail(format!(
            "'{}' is not a JSON array of sections: {e}",
            path.display()
        ))
    })
}

fn handle_generate_command(report_type: &str, config: &AmlcoConfig) {
    let client = client(config);
    let store = open_store(config);
    let report_id = generate_report(&client, &store, report_type).unwrap_or_else(|e| fail(e));
    println!("{report_id}");
}

fn handle_reports_command(query: Option<&str>, config: &AmlcoConfig) {
    let client = client(config);
    let mut board = ReportBoard::new();
    board.load(&client).unwrap_or_else(|e| fail(e));
    if let Some(query) = query {
        board.set_query(query);
    }

    for report in board.filtered() {
        println!(
            "{}\t{}\t{}",
            report.id,
            report.status_label(),
            report.title
        );
    }
    println!(
        "{} of {} reports complete",
        board.completed_count(),
        board.reports().len()
    );
}

fn handle_show_command(id: &str, as_text: bool, config: &AmlcoConfig) {
    let editor = open_editor(&client(config), id, config);
    println!("{} [{}]", editor.title(), editor.status_label());
    if as_text {
        println!("{}", editor.text());
    } else {
        println!("{}", editor.display_html());
    }
}

fn handle_edit_command(id: &str, text_file: &str, config: &AmlcoConfig) {
    let text = fs::read_to_string(text_file)
        .unwrap_or_else(|e| fail(format!("Error reading file '{text_file}': {e}")));
    let client = client(config);
    let mut editor = open_editor(&client, id, config);

    editor.toggle_edit();
    editor.set_text(text);
    editor.save(&client).unwrap_or_else(|e| fail(e));
    println!("Saved {}", editor.report_id());
}

fn handle_delete_command(id: &str, config: &AmlcoConfig) {
    let client = client(config);
    let mut board = ReportBoard::new();
    board.load(&client).unwrap_or_else(|e| fail(e));
    board.delete(&client, id).unwrap_or_else(|e| fail(e));
    println!("Deleted {id}");
}

fn handle_download_command(id: &str, dir: &Path, config: &AmlcoConfig) {
    let client = client(config);
    let editor = open_editor(&client, id, config);
    let (file_name, bytes) = editor.download(&client).unwrap_or_else(|e| fail(e));

    let path = dir.join(file_name);
    fs::write(&path, bytes)
        .unwrap_or_else(|e| fail(format!("Error writing file '{}': {e}", path.display())));
    println!("{}", path.display());
}

fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Conversion formats:");
    for name in registry.list_formats() {
        if let Ok(format) = registry.get(&name) {
            println!(
                "  {name:<6} .{}  {}",
                format.file_extensions().join(", ."),
                format.description()
            );
        }
    }
}
