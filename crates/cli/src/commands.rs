use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Write a table document as a native-format data file
    Write {
        #[arg(long, help = "Table document (JSON) path")]
        table: String,

        #[arg(long, help = "Output data file path")]
        output: String,

        #[arg(
            long,
            help = "Code page of char, varchar and text columns, Windows or OEM (default 1252)"
        )]
        code_page: Option<u16>,

        #[arg(
            long,
            help = "Export the rows with bcp and compare; datetime2 columns need a scale"
        )]
        debug: bool,

        #[arg(long, help = "Load BCP_ORACLE_* variables from this .env file")]
        env_file: Option<String>,
    },
    /// Print the CREATE TABLE statement matching a table document
    Schema {
        #[arg(long, help = "Table document (JSON) path")]
        table: String,

        #[arg(long, default_value = "BCPTest", help = "Name of the created table")]
        name: String,
    },
    /// Compare two data files byte for byte
    Compare {
        left: String,
        right: String,
    },
}
