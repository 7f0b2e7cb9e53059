use clap::{Parser, ValueEnum};
use keno_core::{CageConfig, UnderflowPolicy, DEFAULT_BLADES, DEFAULT_HIT_FREQUENCY};
use std::net::SocketAddr;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "keno",
    version,
    about = "Serve picks from agitated Keno ball cages over HTTP",
    after_help = "Examples:\n\
  # Standard cages (100 and 200 balls) on the default address\n\
  keno\n\
\n\
  # Three cages, slower blades, JSON logs\n\
  keno --cage 10 --cage 50 --cage 90 --hit-frequency 2 --log-format json\n\
\n\
Every request to / prints one line per cage: the first fills the cage\n\
(\"Inserting N balls\"), later ones peek at a ball (\"Ball n (~r remain)\").\n"
)]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "KENO_LISTEN", default_value = "127.0.0.1:8080")]
    pub listen: SocketAddr,

    /// Cage capacity; repeat for more cages. Cages answer in the order given.
    #[arg(long = "cage", value_name = "CAPACITY", default_values_t = keno_core::KENO_CAPACITIES)]
    pub cages: Vec<usize>,

    /// Rotor blades per cage
    #[arg(long, env = "KENO_BLADES", default_value_t = DEFAULT_BLADES)]
    pub blades: usize,

    /// Hits per second for each blade
    #[arg(long, env = "KENO_HIT_FREQUENCY", default_value_t = DEFAULT_HIT_FREQUENCY)]
    pub hit_frequency: u32,

    /// What a blade throws back for a hit that found the cage empty
    #[arg(long, env = "KENO_UNDERFLOW", value_enum, default_value_t = UnderflowArg::ZeroFill)]
    pub underflow: UnderflowArg,

    /// Fill cages without starting rotor blades
    #[arg(long)]
    pub no_agitation: bool,

    /// Log output format
    #[arg(long, env = "KENO_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnderflowArg {
    /// Throw back ball 0 (legacy behaviour, duplicates ball 0)
    ZeroFill,
    /// Throw back only the balls actually taken
    Skip,
}

impl From<UnderflowArg> for UnderflowPolicy {
    fn from(arg: UnderflowArg) -> Self {
        match arg {
            UnderflowArg::ZeroFill => UnderflowPolicy::ZeroFill,
            UnderflowArg::Skip => UnderflowPolicy::Skip,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl Cli {
    /// One config per `--cage`, sharing the blade tuning.
    pub fn cage_configs(&self) -> Vec<CageConfig> {
        self.cages
            .iter()
            .map(|&capacity| CageConfig {
                capacity,
                blades: self.blades,
                hit_frequency: self.hit_frequency,
                underflow: self.underflow.into(),
                agitation: !self.no_agitation,
            })
            .collect()
    }
}
