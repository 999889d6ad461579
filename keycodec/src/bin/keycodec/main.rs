use clap::{Args, Parser, Subcommand};
use keycodec::{
    byte_map::NameToByte,
    codec::KeycodeCodec,
    compiler::{self, Keymap},
    definition::{load_definition, load_table},
    labels::{label_for_byte, short_label, UNIT_SIZE},
    menus::{get_keycodes_for_keyboard, get_other_menu},
    parse_byte, pretty_compile,
    registry::{get_keycodes, Keycode},
};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process,
};

use anyhow::{anyhow, Result};

/// Translate between keycode names and keyboard values
#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON object of the device's keycode names to values
    #[clap(long, short, global = true)]
    table: Option<PathBuf>,

    /// Keyboard definition (JSON) selecting the keycode menus
    #[clap(long, short, global = true)]
    definition: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog keycodes
    KeycodesList(ListKeycodesArgs),
    /// List the keycodes a keyboard definition offers
    KeyboardKeycodes(JsonArgs),
    /// List device table names missing from the catalog
    OtherKeycodes(JsonArgs),
    /// Print the values of keycodes
    Encode(EncodeArgs),
    /// Print the keycodes of values
    Decode(ValuesArgs),
    /// Print key cap labels of values
    Label(LabelArgs),
    /// Validate a keymap file
    Validate(ValidateArgs),
    /// Compile a keymap file to values
    Compile(CompileArgs),
    /// Render values as a keymap
    Decompile(DecompileArgs),
}

#[derive(Args)]
struct ListKeycodesArgs {
    /// Include menu ids and titles
    #[clap(long, short)]
    verbose: bool,

    /// Only list keycodes from this menu
    #[clap(long, short)]
    menu: Option<String>,

    /// Only list keycodes whose code or name contains pattern (case insensitive)
    #[clap()]
    pattern: Option<String>,
}

#[derive(Args)]
struct JsonArgs {
    /// Print keycode records as JSON
    #[clap(long, short)]
    json: bool,
}

#[derive(Args)]
struct EncodeArgs {
    /// Keycodes such as KC_A or MO(1)
    #[clap(required = true)]
    codes: Vec<String>,
}

#[derive(Args)]
struct ValuesArgs {
    /// Values in hex (0x2a) or decimal (42)
    #[clap(required = true)]
    values: Vec<String>,
}

#[derive(Args)]
struct LabelArgs {
    /// Rendering width; 100 is one key unit
    #[clap(long, short, default_value_t = UNIT_SIZE)]
    size: u32,

    #[command(flatten)]
    values: ValuesArgs,
}

#[derive(Args)]
struct ValidateArgs {
    /// Display information about the keymap
    #[clap(long, short)]
    verbose: bool,

    /// Report errors without colour or labels
    #[clap(long)]
    plain: bool,

    /// keymap file
    file: PathBuf,
}

#[derive(Args)]
struct CompileArgs {
    /// Report errors without colour or labels
    #[clap(long)]
    plain: bool,

    /// keymap file
    file: PathBuf,
}

#[derive(Args)]
struct DecompileArgs {
    /// Keys per layer; zero puts every value in one layer
    #[clap(long, short, default_value_t = 0)]
    layer_len: usize,

    /// Keys per line; zero puts each layer on one line
    #[clap(long, short, default_value_t = 0)]
    cols: usize,

    #[command(flatten)]
    values: ValuesArgs,
}

struct Context<'a> {
    table: Option<&'a Path>,
    definition: Option<&'a Path>,
}

impl Context<'_> {
    fn from_cli(cli: &Cli) -> Context<'_> {
        Context {
            table: cli.table.as_deref(),
            definition: cli.definition.as_deref(),
        }
    }

    fn table(&self) -> Result<NameToByte> {
        let path = self
            .table
            .ok_or_else(|| anyhow!("A device table is required (--table)"))?;
        Ok(load_table(path)?)
    }

    fn codec(&self) -> Result<KeycodeCodec> {
        Ok(KeycodeCodec::new(self.table()?))
    }
}

fn parse_values(args: &ValuesArgs) -> Result<Vec<u16>> {
    args.values
        .iter()
        .map(|v| parse_byte(v).map_err(|e| anyhow!(e)))
        .collect()
}

fn print_keycode(out: &mut impl Write, keycode: &Keycode, verbose: bool) -> Result<()> {
    if verbose {
        writeln!(
            out,
            "{:<20} {:<12} {}",
            keycode.code,
            short_label(keycode, UNIT_SIZE),
            keycode.title.as_deref().unwrap_or_default()
        )?;
    } else {
        writeln!(out, "{}", keycode.code)?;
    }
    Ok(())
}

fn print_keycodes<'k>(
    out: &mut impl Write,
    keycodes: impl IntoIterator<Item = &'k Keycode> + serde::Serialize,
    json: bool,
) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, &keycodes)?;
        writeln!(out)?;
    } else {
        for k in keycodes {
            print_keycode(out, k, true)?;
        }
    }
    Ok(())
}

fn list_keycodes(out: &mut impl Write, args: &ListKeycodesArgs) -> Result<()> {
    let pattern = args.pattern.as_ref().map(|p| p.to_lowercase());
    let mut found = false;
    for menu in get_keycodes() {
        if args.menu.as_ref().is_some_and(|m| m != menu.id) {
            continue;
        }
        found = true;
        let keycodes = menu.keycodes.iter().filter(|k| {
            pattern.as_ref().is_none_or(|p| {
                k.code.to_lowercase().contains(p) || k.name.to_lowercase().contains(p)
            })
        });
        for k in keycodes {
            if args.verbose {
                write!(out, "{:<13} ", menu.id)?;
            }
            print_keycode(out, k, args.verbose)?;
        }
    }
    match &args.menu {
        Some(menu) if !found => Err(anyhow!("Unknown menu {menu}")),
        _ => Ok(()),
    }
}

fn keyboard_keycodes(out: &mut impl Write, ctx: &Context, args: &JsonArgs) -> Result<()> {
    let path = ctx
        .definition
        .ok_or_else(|| anyhow!("A keyboard definition is required (--definition)"))?;
    let definition = load_definition(path)?;
    print_keycodes(out, get_keycodes_for_keyboard(&definition), args.json)
}

fn other_keycodes(out: &mut impl Write, ctx: &Context, args: &JsonArgs) -> Result<()> {
    let menu = get_other_menu(&ctx.table()?);
    print_keycodes(out, &menu.keycodes, args.json)
}

fn encode(out: &mut impl Write, ctx: &Context, args: &EncodeArgs) -> Result<()> {
    let codec = ctx.codec()?;
    for code in &args.codes {
        let byte = codec.encode(code)?;
        writeln!(out, "{code}: {byte:#06x}")?;
    }
    Ok(())
}

fn decode(out: &mut impl Write, ctx: &Context, args: &ValuesArgs) -> Result<()> {
    let codec = ctx.codec()?;
    for byte in parse_values(args)? {
        writeln!(out, "{byte:#06x}: {}", codec.decode(byte))?;
    }
    Ok(())
}

fn label(out: &mut impl Write, ctx: &Context, args: &LabelArgs) -> Result<()> {
    let codec = ctx.codec()?;
    for byte in parse_values(&args.values)? {
        let label = label_for_byte(byte, args.size, &codec).replace('\n', " ");
        writeln!(out, "{byte:#06x}: {label}")?;
    }
    Ok(())
}

fn compile_error(file: &Path, err: &str) -> anyhow::Error {
    anyhow!("Failed to compile \"{}\"!\n    {}", file.display(), err)
}

fn compile_file(ctx: &Context, file: &Path, plain: bool) -> Result<Keymap> {
    let src = fs::read_to_string(file).map_err(|err| compile_error(file, &err.to_string()))?;
    let codec = ctx.codec()?;
    if plain {
        compiler::compile(&src, &codec).map_err(|err| {
            if err.span.is_none() {
                compile_error(file, &err.message())
            } else {
                anyhow!("{}", err.long_format(file, &src))
            }
        })
    } else {
        pretty_compile(file, &src, &codec).map_err(|err| {
            if err.span.is_none() {
                compile_error(file, &err.message())
            } else {
                anyhow!("Failed to compile \"{}\"", file.display())
            }
        })
    }
}

fn validate(out: &mut impl Write, ctx: &Context, args: &ValidateArgs) -> Result<()> {
    let keymap = compile_file(ctx, &args.file, args.plain)?;
    if args.verbose {
        writeln!(out, "layers:      {}", keymap.layer_count())?;
        writeln!(out, "keys:        {}", keymap.key_count())?;
        writeln!(out, "values:      {}", keymap.serialize().len())?;
    }
    Ok(())
}

fn compile(out: &mut impl Write, ctx: &Context, args: &CompileArgs) -> Result<()> {
    let keymap = compile_file(ctx, &args.file, args.plain)?;
    for layer in keymap.layers() {
        let line: Vec<String> = layer.iter().map(|b| format!("{b:#06x}")).collect();
        writeln!(out, "{}", line.join(" "))?;
    }
    Ok(())
}

fn decompile(out: &mut impl Write, ctx: &Context, args: &DecompileArgs) -> Result<()> {
    let codec = ctx.codec()?;
    let values = parse_values(&args.values)?;
    write!(
        out,
        "{}",
        compiler::decompile(&values, args.layer_len, args.cols, &codec)
    )?;
    Ok(())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = run(&cli, &mut io::stdout().lock());

    if let Err(message) = result {
        eprintln!("{message}");
        process::exit(1);
    };
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let ctx = Context::from_cli(cli);

    match &cli.command {
        Commands::KeycodesList(args) => list_keycodes(out, args),
        Commands::KeyboardKeycodes(args) => keyboard_keycodes(out, &ctx, args),
        Commands::OtherKeycodes(args) => other_keycodes(out, &ctx, args),
        Commands::Encode(args) => encode(out, &ctx, args),
        Commands::Decode(args) => decode(out, &ctx, args),
        Commands::Label(args) => label(out, &ctx, args),
        Commands::Validate(args) => validate(out, &ctx, args),
        Commands::Compile(args) => compile(out, &ctx, args),
        Commands::Decompile(args) => decompile(out, &ctx, args),
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod test;
