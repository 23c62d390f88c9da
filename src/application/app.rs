//! Main application structure and command dispatch
//!
//! The `Application` wires configuration, the session context, and the
//! service container together, then executes one CLI command against them.
//! Long-running operations (the crypto payment watch) are cancellable via
//! ctrl-c.

use futures::try_join;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use super::health::{HealthService, HealthStatus};
use crate::config::AppConfig;
use crate::core::result::AppResult;
use crate::core::types::TaskId;
use crate::infrastructure::storage::{SessionContext, TokenStore};
use crate::services::tasks::TaskFeedback;
use crate::services::{ServiceContainer, UserProfile};
use crate::utils::cli::{Command, DepositAction, LinkAction, TasksAction};
use crate::utils::time::{format_date, member_for};

/// Main application state and coordinator
#[derive(Debug)]
pub struct Application {
    /// Application configuration
    config: Arc<AppConfig>,

    /// Business services
    services: ServiceContainer,

    /// Health service
    health: HealthService,
}

impl Application {
    /// Build a new application instance with the given configuration
    #[instrument(skip(config))]
    pub async fn build(config: AppConfig) -> AppResult<Self> {
        info!("🏗️  Building application instance");

        config.ensure_valid()?;

        let store = TokenStore::from_config(config.session.store_path.as_deref());
        let session = SessionContext::open(store).await?;

        let services = ServiceContainer::initialize(&config, session)?;
        let health = HealthService::new(services.api.clone(), &config.monitoring);

        info!("✅ Application instance built successfully");
        Ok(Self {
            config: Arc::new(config),
            services,
            health,
        })
    }

    /// The loaded configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Execute one CLI command
    #[instrument(skip(self, command))]
    pub async fn execute(&self, command: Command) -> AppResult<()> {
        match command {
            Command::Login { username, password } => {
                let username = self.services.account.login(&username, &password).await?;
                println!("Logged in as {username}");
            }

            Command::Logout => {
                self.services.account.logout().await?;
                println!("Logged out");
            }

            Command::Profile => {
                let profile = self.services.account.profile().await?;
                Self::print_profile(&profile);
            }

            Command::Dashboard => {
                // The three dashboard fetches are independent; issue them
                // concurrently and let them resolve in any order.
                let (profile, tasks, team) = try_join!(
                    self.services.account.profile(),
                    self.services.tasks.list(),
                    self.services.referral.team_snapshot(),
                )?;

                let standing = self
                    .services
                    .referral
                    .standing_for(profile.wallet, team.total_members())?;

                Self::print_profile(&profile);
                println!();
                println!(
                    "Team: {} members, {} combined wallet",
                    team.total_members(),
                    team.total_wallet()
                );
                let pending = tasks.iter().filter(|t| t.status.is_pending()).count();
                println!("Tasks: {} total, {} pending", tasks.len(), pending);
                println!();
                Self::print_standing(&standing);
            }

            Command::Team => {
                let (snapshot, aggregate) = try_join!(
                    self.services.referral.team_snapshot(),
                    self.services.referral.aggregate(),
                )?;

                println!(
                    "Team of {} members ({} direct), {} combined wallet",
                    aggregate.total_members, aggregate.direct_members, aggregate.total_wallet
                );
                for summary in snapshot.level_summaries() {
                    println!(
                        "  Level {}: {} members, {} wallet",
                        summary.depth, summary.members, summary.wallet_total
                    );
                }
            }

            Command::Tier => {
                let (profile, team) = try_join!(
                    self.services.account.profile(),
                    self.services.referral.team_snapshot(),
                )?;

                let standing = self
                    .services
                    .referral
                    .standing_for(profile.wallet, team.total_members())?;
                Self::print_standing(&standing);
            }

            Command::Tasks { action } => self.execute_tasks(action).await?,

            Command::Deposit { action } => self.execute_deposit(action).await?,

            Command::Withdraw { amount, address } => {
                let profile = self.services.account.profile().await?;
                self.services
                    .withdrawals
                    .request(amount, &address, profile.wallet)
                    .await?;
                println!("Withdrawal of {amount} to {address} requested");
            }

            Command::Withdrawals => {
                let history = self.services.withdrawals.history().await?;
                if history.is_empty() {
                    println!("No withdrawals yet");
                }
                for record in history {
                    let when = record
                        .requested_at
                        .map(|d| format_date(&d))
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{}  {}  {}  {}",
                        when, record.amount, record.address, record.status
                    );
                }
            }

            Command::Link { action } => match action {
                LinkAction::SetParent { parent } => {
                    self.services.account.set_parent(&parent).await?;
                    println!("Linked under {parent}");
                }
                LinkAction::CreateTeam => {
                    self.services.account.create_team().await?;
                    println!("Team record created");
                }
            },

            Command::Health => {
                let component = self.health.check_backend().await?;
                match component.status {
                    HealthStatus::Healthy => {
                        let latency = component
                            .response_time
                            .map(|d| format!("{d:?}"))
                            .unwrap_or_default();
                        println!("Backend reachable ({latency})");
                    }
                    _ => {
                        println!(
                            "Backend unreachable: {}",
                            component.message.unwrap_or_default()
                        );
                    }
                }
            }
        }

        Ok(())
    }

    async fn execute_tasks(&self, action: TasksAction) -> AppResult<()> {
        match action {
            TasksAction::List => {
                let tasks = self.services.tasks.list().await?;
                if tasks.is_empty() {
                    println!("No tasks available");
                }
                for task in tasks {
                    println!(
                        "{}  [{}]  {}  reward {}  ({})",
                        task.id, task.task_type, task.title, task.reward, task.status
                    );
                }
            }
            TasksAction::Complete { id, rating, feedback } => {
                let profile = self.services.account.profile().await?;
                let feedback = TaskFeedback { rating, feedback };
                let wallet = self
                    .services
                    .tasks
                    .complete(&TaskId::new(id), &feedback, profile.wallet)
                    .await?;
                println!("Task completed, wallet now {wallet}");
            }
        }
        Ok(())
    }

    async fn execute_deposit(&self, action: DepositAction) -> AppResult<()> {
        match action {
            DepositAction::Checkout { amount } => {
                let order = self.services.checkout.create_order(amount).await?;
                println!("Checkout order {} created for {}", order.order_id, amount);
                println!("Pay it in the hosted checkout page, then run:");
                println!(
                    "  sky366 deposit verify {} {} --payment-id <id> --signature <sig>",
                    order.order_id, amount
                );
            }

            DepositAction::Verify {
                order_id,
                amount,
                payment_id,
                signature,
            } => {
                let order = crate::services::payment::CheckoutOrder {
                    order_id,
                    amount,
                    currency: None,
                };
                let wallet = self
                    .services
                    .checkout
                    .verify_and_credit(&order, &payment_id, &signature)
                    .await?;
                println!("Deposit verified, wallet now {wallet}");
            }

            DepositAction::Crypto { amount } => {
                let invoice = self.services.crypto.create_invoice(amount).await?;
                println!(
                    "Send exactly {} to {}",
                    invoice.pay_amount, invoice.pay_address
                );
                println!("Watching payment {} (ctrl-c to stop)...", invoice.payment_id);

                // Tie the watch to ctrl-c so leaving early cancels the
                // poll instead of orphaning it.
                let cancel = CancellationToken::new();
                let signal_cancel = cancel.clone();
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        signal_cancel.cancel();
                    }
                });

                let wallet = self.services.crypto.watch_and_credit(&invoice, cancel).await?;
                println!("Deposit finished, wallet now {wallet}");
            }
        }
        Ok(())
    }

    fn print_profile(profile: &UserProfile) {
        println!("{} <{}>", profile.username, profile.email);
        if let Some(ref phone) = profile.phone {
            println!("Phone: {phone}");
        }
        println!("Wallet: {}", profile.wallet);
        println!(
            "Joined: {} ({})",
            format_date(&profile.join_date),
            member_for(&profile.join_date)
        );
    }

    fn print_standing(standing: &crate::core::tier::TierStanding) {
        println!(
            "Current tier: {} (level {})",
            standing.current.title, standing.current.level
        );
        match &standing.next {
            Some(next) => {
                println!("Next tier: {} (level {})", next.title, next.level);
                println!(
                    "  Wallet progress:   {}% toward {}",
                    standing.wallet_progress.round_dp(2),
                    next.min_wallet
                );
                println!(
                    "  Downline progress: {}% toward {} members",
                    standing.downline_progress.round_dp(2),
                    next.min_downline_count
                );
            }
            None => println!("Top tier reached"),
        }
    }
}
