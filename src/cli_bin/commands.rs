//! CLI command handlers that bridge CLI arguments to library operations

use crate::cli_bin::args::*;
use anyhow::{bail, Context as _, Result};
use log::{debug, info, warn};
use personote::config::SETTINGS_FILE;
use personote::{
    create_person_note, import_contacts, parse_records, BatchEditor, BatchOptions, CheckState,
    ConsoleNotifier, EditKind, EditOperation, EncodeStyle, FileTreeProvider, FsDocumentStore,
    FsTreeProvider, Notifier, PropertyType, SelectionNode, SelectionSet, Settings,
};
use regex::Regex;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Vault location and effective settings for one run
pub struct Context {
    pub vault: PathBuf,
    pub settings_path: PathBuf,
    /// Settings as stored on disk
    pub stored: Settings,
    /// Stored settings with command-line overrides applied
    pub settings: Settings,
}

impl Context {
    pub fn load(cli: &Cli) -> Result<Self> {
        let settings_path = cli
            .config
            .clone()
            .unwrap_or_else(|| cli.vault.join(SETTINGS_FILE));
        let stored = Settings::load(&settings_path)
            .with_context(|| format!("Failed to load settings from {}", settings_path.display()))?;
        let settings = apply_overrides(stored.clone(), &cli.overrides);
        debug!("Effective settings: {:?}", settings);

        Ok(Self {
            vault: cli.vault.clone(),
            settings_path,
            stored,
            settings,
        })
    }

    fn store(&self) -> FsDocumentStore {
        FsDocumentStore::new(&self.vault)
    }
}

fn apply_overrides(mut settings: Settings, overrides: &SettingsOverrides) -> Settings {
    if let Some(template) = &overrides.template {
        settings.template_path = Some(template.clone());
    }
    if let Some(contacts) = &overrides.contacts {
        settings.contacts_import_path = Some(contacts.clone());
    }
    if let Some(folder) = &overrides.people_folder {
        settings.people_folder = folder.clone();
    }
    if let Some(style) = overrides.style {
        settings.encode_style = style.into();
    }
    settings
}

impl From<StyleArg> for EncodeStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Yaml => EncodeStyle::Yaml,
            StyleArg::Json => EncodeStyle::Json,
        }
    }
}

impl From<EditKindArg> for EditKind {
    fn from(kind: EditKindArg) -> Self {
        match kind {
            EditKindArg::Add => EditKind::Add,
            EditKindArg::Replace => EditKind::Replace,
            EditKindArg::Delete => EditKind::Delete,
        }
    }
}

impl From<PropertyTypeArg> for PropertyType {
    fn from(type_: PropertyTypeArg) -> Self {
        match type_ {
            PropertyTypeArg::Scalar => PropertyType::Scalar,
            PropertyTypeArg::List => PropertyType::List,
        }
    }
}

/// Execute the new command
pub fn new_command(ctx: &Context, args: NewArgs) -> Result<()> {
    debug!("Executing new command with args: {:?}", args);
    let mut store = ctx.store();

    let created = match args.name {
        Some(name) => {
            let mut input = move |_: &str| Some(name.clone());
            create_person_note(&mut store, &ctx.settings, &mut input, &ConsoleNotifier)?
        }
        None => create_person_note(&mut store, &ctx.settings, &mut prompt_stdin, &ConsoleNotifier)?,
    };

    match created {
        Some(document) => println!("Created {}", document),
        None => info!("No file name provided"),
    }
    Ok(())
}

/// Ask on stdout, read one line from stdin
fn prompt_stdin(prompt: &str) -> Option<String> {
    print!("{} ", prompt);
    io::stdout().flush().ok()?;
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

/// Execute the import command
pub fn import_command(ctx: &Context) -> Result<()> {
    debug!("Executing import command");
    let mut store = ctx.store();
    let report = import_contacts(&mut store, &ctx.settings, &ConsoleNotifier)?;
    for document in &report.created {
        info!("Created: {}", document);
    }
    Ok(())
}

/// Execute the contacts command
pub fn contacts_command(args: ContactsArgs) -> Result<()> {
    debug!("Executing contacts command with args: {:?}", args);
    let content = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let records: Vec<_> = parse_records(&content).collect();
    if records.is_empty() {
        warn!("No contact cards found in {}", args.file.display());
    }

    let output = match args.format {
        OutputFormat::Yaml => serde_yaml::to_string(&records)?,
        OutputFormat::Json => serde_json::to_string_pretty(&records)?,
    };
    println!("{}", output.trim_end());
    Ok(())
}

/// Execute the edit command
pub fn edit_command(ctx: &Context, args: EditArgs) -> Result<()> {
    debug!("Executing edit command with args: {:?}", args);
    let tree = load_tree(&ctx.vault)?;
    let selection = build_selection(&tree, &args.selection)?;
    if selection.is_empty() {
        warn!("No files found to process");
    }

    let operation = EditOperation::new(
        args.kind.into(),
        args.property,
        args.type_.into(),
        args.value,
    );
    let options = BatchOptions {
        dry_run: args.dry_run,
        style: ctx.settings.encode_style,
    };

    let mut store = ctx.store();
    let report = BatchEditor::with_options(&mut store, options).apply(&selection, &operation)?;

    if args.dry_run {
        for document in &report.modified {
            println!("Would update: {}", document);
        }
    }
    for (document, reason) in &report.failures {
        eprintln!("{}: {}", document, reason);
    }
    ConsoleNotifier.notify(&report.summary());

    if report.has_failures() {
        bail!("{} of {} files failed", report.failures.len(), selection.len());
    }
    Ok(())
}

/// Execute the tree command
pub fn tree_command(ctx: &Context, args: TreeArgs) -> Result<()> {
    debug!("Executing tree command with args: {:?}", args);
    let tree = load_tree(&ctx.vault)?;
    let selection = build_selection(&tree, &args.selection)?;
    print!("{}", render_tree(&tree, &selection));
    if !selection.is_empty() {
        println!("{} notes selected", selection.len());
    }
    Ok(())
}

/// Execute the config command
pub fn config_command(ctx: &Context, args: ConfigArgs) -> Result<()> {
    debug!("Executing config command with args: {:?}", args);
    match args.action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(&ctx.settings)?);
        }
        ConfigAction::SetTemplate { path } => {
            let mut settings = ctx.stored.clone();
            settings.template_path = Some(path.trim().to_string()).filter(|p| !p.is_empty());
            settings.save(&ctx.settings_path)?;
            info!("Saved settings to {}", ctx.settings_path.display());
        }
        ConfigAction::SetContacts { path } => {
            let mut settings = ctx.stored.clone();
            settings.contacts_import_path = Some(path.trim().to_string()).filter(|p| !p.is_empty());
            settings.save(&ctx.settings_path)?;
            info!("Saved settings to {}", ctx.settings_path.display());
        }
    }
    Ok(())
}

fn load_tree(vault: &Path) -> Result<SelectionNode> {
    if !vault.is_dir() {
        bail!("Vault directory not found: {}", vault.display());
    }
    let root = FsTreeProvider::new(vault).root()?;
    Ok(SelectionNode::build(&root))
}

/// Apply `--select`, `--match` and then `--deselect`, in that order
fn build_selection(tree: &SelectionNode, args: &SelectionArgs) -> Result<SelectionSet> {
    let mut selection = SelectionSet::new();

    for path in &args.select {
        toggle_path(tree, &mut selection, path, true);
    }

    if let Some(pattern) = &args.pattern {
        let regex = Regex::new(pattern)
            .with_context(|| format!("Invalid --match pattern: {}", pattern))?;
        for document in tree.leaves() {
            if regex.is_match(document.path()) {
                selection.toggle_leaf(document, true);
            }
        }
    }

    for path in &args.deselect {
        toggle_path(tree, &mut selection, path, false);
    }
    Ok(selection)
}

fn toggle_path(tree: &SelectionNode, selection: &mut SelectionSet, path: &str, selected: bool) {
    let path = personote::io::normalize_path(path);
    match tree.find(&path) {
        Some(node) => node.toggle(selection, selected),
        None => warn!("No note or folder at {}", path),
    }
}

/// Render the tree with one checkbox per line
fn render_tree(tree: &SelectionNode, selection: &SelectionSet) -> String {
    let mut out = String::new();
    render_node(tree, selection, 0, &mut out);
    out
}

fn render_node(node: &SelectionNode, selection: &SelectionSet, depth: usize, out: &mut String) {
    let mark = match node.state(selection) {
        CheckState::Checked => "[x]",
        CheckState::Unchecked => "[ ]",
        CheckState::Partial => "[-]",
    };
    let suffix = match node {
        SelectionNode::Container { .. } => "/",
        SelectionNode::Leaf(_) => "",
    };
    out.push_str(&format!(
        "{}{} {}{}\n",
        "  ".repeat(depth),
        mark,
        node.name(),
        suffix
    ));
    for child in node.children() {
        render_node(child, selection, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use personote::{DocumentRef, Folder};
    use pretty_assertions::assert_eq;

    fn sample_tree() -> SelectionNode {
        let mut root = Folder::from_paths(["People/Jane.md", "People/Bob.md", "index.md"]);
        root.name = "vault".to_string();
        SelectionNode::build(&root)
    }

    #[test]
    fn test_render_tree() {
        let tree = sample_tree();
        let mut selection = SelectionSet::new();
        selection.toggle_leaf(&DocumentRef::new("People/Jane.md"), true);

        assert_eq!(
            render_tree(&tree, &selection),
            "[-] vault/\n  [-] People/\n    [x] Jane.md\n    [ ] Bob.md\n  [ ] index.md\n"
        );
    }

    #[test]
    fn test_build_selection() {
        let tree = sample_tree();
        let args = SelectionArgs {
            select: vec!["People".to_string()],
            deselect: vec!["People/Bob.md".to_string()],
            pattern: Some(r"^index\.md$".to_string()),
        };
        let selection = build_selection(&tree, &args).unwrap();
        let paths: Vec<_> = selection.iter().map(DocumentRef::path).collect();
        assert_eq!(paths, ["People/Jane.md", "index.md"]);
    }

    #[test]
    fn test_invalid_pattern() {
        let args = SelectionArgs {
            pattern: Some("(".to_string()),
            ..Default::default()
        };
        assert!(build_selection(&sample_tree(), &args).is_err());
    }

    #[test]
    fn test_overrides() {
        let overrides = SettingsOverrides {
            people_folder: Some("Contacts".to_string()),
            style: Some(StyleArg::Json),
            ..Default::default()
        };
        let settings = apply_overrides(Settings::default(), &overrides);
        assert_eq!(settings.people_folder, "Contacts");
        assert_eq!(settings.encode_style, EncodeStyle::Json);
        assert_eq!(settings.template_path, None);
    }
}
