pub mod get;
pub mod has;
pub mod init;
pub mod ls;
pub mod put;
pub mod rm;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Command {
    /// Write a config file for a bucket
    Init(init::InitArgs),
    /// List entries below a folder
    Ls(ls::LsArgs),
    /// Check whether a key exists
    Has(has::HasArgs),
    /// Fetch an object
    Get(get::GetArgs),
    /// Store an object
    Put(put::PutArgs),
    /// Delete an object
    Rm(rm::RmArgs),
}
