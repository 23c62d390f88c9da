//! Utility functions and helpers used throughout the application
//!
//! This module provides common utility functions for time handling,
//! input validation, and command-line parsing.

pub mod time;
pub mod validation;

/// Command-line argument parsing
pub mod cli {
    use clap::{Parser, Subcommand};
    use rust_decimal::Decimal;

    /// Command line arguments for the application
    #[derive(Parser, Debug, Clone)]
    #[command(
        name = "sky366",
        about = "Command-line client for the Sky366Trade rewards platform",
        version = env!("CARGO_PKG_VERSION")
    )]
    pub struct CliArgs {
        /// Path to configuration file
        #[arg(short, long, env = "SKY366_CONFIG_PATH")]
        pub config_path: Option<String>,

        /// Backend base URL override
        #[arg(long, env = "SKY366_API_BASE_URL")]
        pub base_url: Option<String>,

        /// Logging level (trace, debug, info, warn, error)
        #[arg(short, long, default_value = "info", env = "SKY366_LOG_LEVEL")]
        pub log_level: String,

        /// Log format (json, pretty, compact)
        #[arg(long, default_value = "pretty", env = "SKY366_LOG_FORMAT")]
        pub log_format: String,

        /// Environment (development, staging, production)
        #[arg(short, long, env = "SKY366_ENVIRONMENT")]
        pub environment: Option<String>,

        /// Operation to perform
        #[command(subcommand)]
        pub command: Option<Command>,
    }

    /// Top-level operations
    #[derive(Subcommand, Debug, Clone)]
    pub enum Command {
        /// Log in and store the session
        Login {
            /// Platform username
            username: String,
            /// Account password
            #[arg(long, env = "SKY366_PASSWORD", hide_env_values = true)]
            password: String,
        },
        /// Discard the stored session
        Logout,
        /// Show the account profile
        Profile,
        /// Show profile, tasks, team, and tier standing in one view
        Dashboard,
        /// Show the downline team by depth
        Team,
        /// Show the current tier and progress toward the next
        Tier,
        /// Task operations
        Tasks {
            /// Task operation to perform
            #[command(subcommand)]
            action: TasksAction,
        },
        /// Deposit operations
        Deposit {
            /// Deposit path to use
            #[command(subcommand)]
            action: DepositAction,
        },
        /// Request a withdrawal
        Withdraw {
            /// Amount to withdraw
            amount: Decimal,
            /// Destination address
            address: String,
        },
        /// Show withdrawal history
        Withdrawals,
        /// Referral linking operations
        Link {
            /// Linking operation to perform
            #[command(subcommand)]
            action: LinkAction,
        },
        /// Probe backend reachability
        Health,
    }

    /// Task subcommands
    #[derive(Subcommand, Debug, Clone)]
    pub enum TasksAction {
        /// List all tasks
        List,
        /// Complete a task with a rating and feedback
        Complete {
            /// Task identifier
            id: String,
            /// Star rating, 1 to 5
            #[arg(long)]
            rating: u8,
            /// Free-form feedback text
            #[arg(long)]
            feedback: String,
        },
    }

    /// Deposit subcommands
    #[derive(Subcommand, Debug, Clone)]
    pub enum DepositAction {
        /// Create a hosted checkout order
        Checkout {
            /// Deposit amount
            amount: Decimal,
        },
        /// Verify a paid checkout order and credit the wallet
        Verify {
            /// Gateway order identifier from `deposit checkout`
            order_id: String,
            /// Deposit amount of the order
            amount: Decimal,
            /// Payment identifier returned by the hosted page
            #[arg(long)]
            payment_id: String,
            /// Signature returned by the hosted page
            #[arg(long)]
            signature: String,
        },
        /// Create a crypto invoice and watch it until it completes
        Crypto {
            /// Deposit amount
            amount: Decimal,
        },
    }

    /// Referral linking subcommands
    #[derive(Subcommand, Debug, Clone)]
    pub enum LinkAction {
        /// Link this account under a referrer
        SetParent {
            /// Referrer username
            parent: String,
        },
        /// Create the referral team record for this account
        CreateTeam,
    }
}

// Re-export CLI utilities
pub use cli::{CliArgs, Command, DepositAction, LinkAction, TasksAction};

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_args_parsing() {
        let args = CliArgs::parse_from(["sky366", "--log-level", "debug", "profile"]);
        assert_eq!(args.log_level, "debug");
        assert!(matches!(args.command, Some(Command::Profile)));
    }

    #[test]
    fn test_nested_subcommands() {
        let args = CliArgs::parse_from([
            "sky366", "tasks", "complete", "t1", "--rating", "5", "--feedback", "nice",
        ]);
        match args.command {
            Some(Command::Tasks {
                action: TasksAction::Complete { id, rating, feedback },
            }) => {
                assert_eq!(id, "t1");
                assert_eq!(rating, 5);
                assert_eq!(feedback, "nice");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_decimal_arguments() {
        let args = CliArgs::parse_from(["sky366", "deposit", "crypto", "250.50"]);
        match args.command {
            Some(Command::Deposit {
                action: DepositAction::Crypto { amount },
            }) => assert_eq!(amount.to_string(), "250.50"),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
