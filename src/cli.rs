//! Minimal CLI: document → (rendered schema | mock)
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rayon::prelude::*;

use schema_mock::supplier::DEFAULT_DICTIONARY_PATH;
use schema_mock::{Dictionary, Document, MockEncoding, MockGenerator, Mockable, SchemaRenderer, SchemaResolver};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// render sample values from JSON Schema / OpenAPI documents
#[derive(Parser, Debug)]
#[command(name = "schema-mock", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// render a schema (the document root, a named component, or a pointed-to node)
    Render(RenderOut),
    /// mock a media-type-like node: inline example, named examples, then schema
    Mock(MockOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON or YAML document (`.yaml`/`.yml` read as YAML)
    #[arg(long, short)]
    input: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct RendererSettings {
    /// line-delimited word list used for plain strings
    #[arg(long, default_value = DEFAULT_DICTIONARY_PATH)]
    dictionary: PathBuf,

    /// render every declared property, not only the required ones
    #[arg(long, default_value_t = false)]
    disable_required_check: bool,

    /// seed the random source for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug, Clone)]
struct OutputSettings {
    #[arg(long, value_enum, default_value_t = Encoding::Json)]
    encoding: Encoding,

    /// indent JSON output
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// number of independent samples
    #[arg(long, default_value_t = 1)]
    count: usize,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Encoding {
    Json,
    Yaml,
}

#[derive(clap::Parser, Debug)]
struct RenderOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// component name looked up under components/schemas, $defs or definitions
    #[arg(long, conflicts_with = "json_pointer")]
    component: Option<String>,

    /// JSON Pointer to the schema node (e.g. /components/schemas/Pet)
    #[arg(long)]
    json_pointer: Option<String>,

    #[command(flatten)]
    renderer_settings: RendererSettings,

    #[command(flatten)]
    output_settings: OutputSettings,
}

#[derive(clap::Parser, Debug)]
struct MockOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// JSON Pointer to the node carrying example/examples/schema
    /// (e.g. /paths/~1pets/get/responses/200/content/application~1json)
    #[arg(long)]
    json_pointer: String,

    /// named example to prefer; falls back to the first one
    #[arg(long, default_value = "")]
    example_name: String,

    #[command(flatten)]
    renderer_settings: RendererSettings,

    #[command(flatten)]
    output_settings: OutputSettings,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load(&self) -> anyhow::Result<Document> {
        Document::load(&self.input).with_context(|| format!("failed to load {}", self.input.display()))
    }
}

impl RendererSettings {
    fn renderer(&self) -> SchemaRenderer {
        let renderer = SchemaRenderer::new(Dictionary::load_or_empty(&self.dictionary));
        let renderer = match self.seed {
            Some(seed) => renderer.with_seed(seed),
            None => renderer,
        };
        if self.disable_required_check {
            renderer.disable_required_check()
        } else {
            renderer
        }
    }
}

impl From<Encoding> for MockEncoding {
    fn from(encoding: Encoding) -> Self {
        match encoding {
            Encoding::Json => MockEncoding::Json,
            Encoding::Yaml => MockEncoding::Yaml,
        }
    }
}

impl OutputSettings {
    /// Render `count` samples in parallel. Seeded runs derive one seed per
    /// sample so every sample differs but the batch repeats.
    fn generate<M>(
        &self,
        renderer: &SchemaRenderer,
        mock: &M,
        example_name: &str,
        resolver: &(dyn SchemaResolver + Sync),
    ) -> anyhow::Result<Vec<Vec<u8>>>
    where
        M: Mockable + Sync,
    {
        (0..self.count)
            .into_par_iter()
            .map(|index| {
                let renderer = match renderer.seed() {
                    Some(seed) => renderer.clone().with_seed(seed.wrapping_add(index as u64)),
                    None => renderer.clone(),
                };
                let mut generator = MockGenerator::new(self.encoding.into()).with_renderer(renderer);
                if self.pretty {
                    generator = generator.pretty();
                }
                generator
                    .generate_mock(mock, example_name, resolver)
                    .with_context(|| format!("failed to generate sample {index}"))
            })
            .collect()
    }

    fn write(&self, samples: &[Vec<u8>]) -> anyhow::Result<()> {
        let mut buffer = Vec::new();
        for (index, sample) in samples.iter().enumerate() {
            if index > 0 && matches!(self.encoding, Encoding::Yaml) {
                buffer.extend_from_slice(b"---\n");
            }
            buffer.extend_from_slice(sample);
            if !sample.ends_with(b"\n") {
                buffer.push(b'\n');
            }
        }
        match self.out.as_ref() {
            Some(out) => write_file(out, &buffer),
            None => std::io::stdout()
                .lock()
                .write_all(&buffer)
                .context("failed to write to stdout"),
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Render(target) => {
                let document = target.input_settings.load()?;
                let schema = match (&target.component, &target.json_pointer) {
                    (Some(name), _) => document
                        .components()
                        .by_name(name)
                        .cloned()
                        .with_context(|| format!("no component named `{name}`"))?,
                    (None, Some(pointer)) => document.schema_at(pointer)?,
                    (None, None) => document.schema_at("")?,
                };
                let renderer = target.renderer_settings.renderer();
                let samples = target
                    .output_settings
                    .generate(&renderer, &schema, "", document.components())?;
                target.output_settings.write(&samples)
            }
            Command::Mock(target) => {
                let document = target.input_settings.load()?;
                let media = document.media_type_at(&target.json_pointer)?;
                let renderer = target.renderer_settings.renderer();
                let samples = target.output_settings.generate(
                    &renderer,
                    &media,
                    &target.example_name,
                    document.components(),
                )?;
                target.output_settings.write(&samples)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_file(out: &Path, contents: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(out, contents).with_context(|| format!("failed to write {}", out.display()))
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_render_with_shared_options() {
        let cli = CommandLineInterface::try_parse_from([
            "schema-mock", "render", "--input", "api.yaml", "--component", "Pet",
            "--seed", "7", "--encoding", "yaml", "--count", "3",
        ])
        .unwrap();
        let Command::Render(target) = cli.cmd else { panic!("expected render") };
        assert_eq!(target.component.as_deref(), Some("Pet"));
        assert_eq!(target.renderer_settings.seed, Some(7));
        assert_eq!(target.output_settings.count, 3);
        assert!(matches!(target.output_settings.encoding, Encoding::Yaml));
    }

    #[test]
    fn component_and_pointer_conflict() {
        let parsed = CommandLineInterface::try_parse_from([
            "schema-mock", "render", "-i", "api.json", "--component", "Pet", "--json-pointer", "/x",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn seeded_batches_repeat_but_samples_differ() {
        let document = Document::from_value(serde_json::json!({
            "type": "object",
            "properties": {"n": {"type": "integer", "minimum": 0, "maximum": 1000000000}}
        }))
        .unwrap();
        let schema = document.schema_at("").unwrap();
        let renderer = SchemaRenderer::default().with_seed(5);
        let output = OutputSettings { encoding: Encoding::Json, pretty: false, count: 4, out: None };

        let first = output.generate(&renderer, &schema, "", document.components()).unwrap();
        let second = output.generate(&renderer, &schema, "", document.components()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
        assert_ne!(first[0], first[1]);
    }
}
