use std::path::PathBuf;

use clap::Args;

use trellis_core::registry::Registry;
use trellis_core::types::FormatType;

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Document files to classify
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Serialization format of the files: json, json_lines, xml
    #[arg(long, default_value = "json")]
    pub format: FormatType,

    /// Path to a trellis.toml selecting the enabled document types
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[allow(clippy::unused_async)]
pub async fn run(args: ClassifyArgs) -> anyhow::Result<()> {
    let config = super::load_config(args.config.as_ref())?;
    let registry = Registry::from_config(&config)?;

    for path in &args.files {
        let doc = super::read_document(path, args.format)?;
        let doc_type = registry.guess(&doc.blob, doc.format);
        println!("{}\t{doc_type}", path.display());
    }

    Ok(())
}
