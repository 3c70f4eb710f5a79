pub mod config;
pub mod ingest;
pub mod source;
pub mod testing;
pub mod ticket;
pub mod view;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
    ServerConfig, UpstreamConfig,
};
pub use ingest::{
    IngestError, IngestErrorInfo, IngestPhase, IngestionLoop, SearchSession, SessionSnapshot,
    SessionState, TicketBatch,
};
pub use source::{HttpTicketSource, PollBatch, SearchId, SourceError, TicketSource};
pub use ticket::{RawTicket, Segment, Ticket, TicketId};
pub use view::{
    compute_visible, count_matching, FilterId, FilterOption, FilterSet, SortMode, INITIAL_REVEAL,
    REVEAL_STEP,
};
