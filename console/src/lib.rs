pub mod config;
pub mod render;
pub mod session;
pub mod signature;
pub mod signing;
pub mod wizard;

pub use config::{ConfigError, ConsoleConfig};
pub use render::{render_terms, TermsDocument, TermsSection};
pub use session::{Identity, Session, SessionError};
pub use signature::{Point, SignaturePad, BLANK_SIGNATURE};
pub use signing::{ReviewState, SignerDetails, SigningDesk, SigningError};
pub use wizard::{parse_amount, ContractForm, ContractPreview, ContractWizard, WizardError};
