//! Command-line front end for the SBA/SPIR-V translator. Out of scope
//! for the core (spec §1's "external collaborators": file I/O, argument
//! parsing, diagnostic formatting to a terminal), but a complete repo
//! needs a real way to invoke `sba-asm`, so this crate provides one.
//! Grounded on `vasm/src/main.rs`'s read-file/assemble/write-file shape,
//! ported from clap's old builder API to the derive API.

use clap::{Parser, Subcommand};
use log::{error, info};
use spirv_ir::Section;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sba", version, about = "SPIR-V Basic Assembly translator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assemble an SBA text file into a SPIR-V binary module.
    Assemble {
        /// Input .sba source file.
        input: PathBuf,

        /// Output binary file; defaults to the input path with a
        /// `.spv` extension.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overrides the emitted header's major version (default 1).
        #[arg(long = "version-major", default_value_t = 1)]
        version_major: u8,

        /// Overrides the emitted header's minor version (default 0).
        #[arg(long = "version-minor", default_value_t = 0)]
        version_minor: u8,

        /// Overrides the emitted header's generator id (default 0,
        /// opaque to consumers per spec §6).
        #[arg(long = "generator-id", default_value_t = 0)]
        generator_id: u32,
    },
    /// Disassemble a SPIR-V binary module into a debug listing.
    ///
    /// This is not a re-emission of SBA text: spec §4.4 explicitly
    /// leaves reverse-translating enumerants, strings and IDs back to
    /// source form as a separate rendering concern out of scope.
    Disassemble {
        /// Input binary module file.
        input: PathBuf,

        /// Output listing file; defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Assemble {
            input,
            output,
            version_major,
            version_minor,
            generator_id,
        } => run_assemble(&input, output.as_deref(), version_major, version_minor, generator_id),
        Command::Disassemble { input, output } => run_disassemble(&input, output.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{}", message);
            ExitCode::FAILURE
        }
    }
}

fn run_assemble(
    input_path: &Path,
    output: Option<&Path>,
    version_major: u8,
    version_minor: u8,
    generator_id: u32,
) -> Result<(), String> {
    info!("assembling {}", input_path.display());
    let source = fs::read_to_string(input_path)
        .map_err(|err| format!("reading \"{}\" failed: {}", input_path.display(), err))?;

    let mut output_session = sba_asm::assemble(&source);

    if !output_session.diagnostics.is_empty() {
        for diagnostic in output_session.diagnostics.iter() {
            error!("{}", diagnostic);
        }
        return Err(format!(
            "{} produced {} diagnostic(s); no output written",
            input_path.display(),
            output_session.diagnostics.len()
        ));
    }

    output_session.module.header.version =
        (u32::from(version_major) << 16) | (u32::from(version_minor) << 8);
    output_session.module.header.generator = generator_id;

    let bytes = spirv_ir::bake(&output_session.module);
    let output_path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| input_path.with_extension("spv"));
    fs::write(&output_path, &bytes)
        .map_err(|err| format!("writing \"{}\" failed: {}", output_path.display(), err))?;

    info!("wrote {} ({} bytes)", output_path.display(), bytes.len());
    Ok(())
}

fn run_disassemble(input_path: &Path, output: Option<&Path>) -> Result<(), String> {
    info!("disassembling {}", input_path.display());
    let bytes = fs::read(input_path)
        .map_err(|err| format!("reading \"{}\" failed: {}", input_path.display(), err))?;

    let module = sba_asm::disassemble(&bytes).map_err(|err| err.to_string())?;
    let listing = render_listing(&module);

    match output {
        Some(path) => fs::write(path, listing)
            .map_err(|err| format!("writing \"{}\" failed: {}", path.display(), err))?,
        None => print!("{}", listing),
    }

    Ok(())
}

const SECTIONS: [(Section, &str); 10] = [
    (Section::Capability, "Capability"),
    (Section::Extensions, "Extensions"),
    (Section::Imports, "Imports"),
    (Section::MemoryModel, "MemoryModel"),
    (Section::EntryPoints, "EntryPoints"),
    (Section::ExecutionModes, "ExecutionModes"),
    (Section::Debug, "Debug"),
    (Section::Annotations, "Annotations"),
    (Section::Types, "Types"),
    (Section::Functions, "Functions"),
];

fn render_listing(module: &spirv_ir::Module) -> String {
    let mut out = String::new();
    let header = &module.header;
    out.push_str(&format!(
        "; version {:#010x} generator {:#010x} bounds {} schema {}\n",
        header.version, header.generator, header.bounds, header.schema
    ));
    for (section, name) in SECTIONS {
        for instr in module.section(section) {
            out.push_str(&format!(
                "; {:<14} opcode={:<3} words={:?}\n",
                name, instr.opcode, instr.words
            ));
        }
    }
    out
}
