//! One module per subcommand; the static tables each script operated on
//! live next to the command that uses them.

pub mod add_cards;
pub mod admin_split;
pub mod create_board;
pub mod label;
pub mod phases;
pub mod restructure;
pub mod slack_setup;
