use std::sync::Arc;

use chrono::{Duration, Local, NaiveTime};
use clap::Args;
use renthub::access::{
    FeatureGate, FeatureGateOutcome, Permission, PermissionPolicy, Role, Tier, UserSnapshot,
};
use renthub::directory::{PetsFilter, TenantQuery};
use renthub::error::AppError;
use renthub::workflows::invitations::{InvitationService, InviteRequest};
use renthub::workflows::showings::{ShowingRequest, ShowingService, ShowingStatus};

use crate::infra::{
    sample_tenants, InMemoryInvitationRepository, InMemoryShowingRepository, RecordingNotifier,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Tenant receiving the demo invitation
    #[arg(long, default_value = "tenant-demo-1")]
    pub(crate) tenant_id: String,
    /// Listing featured throughout the demo
    #[arg(long, default_value = "listing-demo-88")]
    pub(crate) listing_id: String,
    /// Skip the showing lifecycle portion of the demo
    #[arg(long)]
    pub(crate) skip_showings: bool,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        tenant_id,
        listing_id,
        skip_showings,
    } = args;

    let policy = PermissionPolicy::standard();
    let agent = UserSnapshot {
        user_id: "agent-demo-7".to_string(),
        email: "agent@renthub.example".to_string(),
        role: Role::Agent,
        tier: Tier::Verified,
        is_verified: true,
    };

    println!("RentHub workflow demo");
    println!(
        "Acting as {} ({}, {} tier)",
        agent.email,
        agent.role.label(),
        agent.tier.label()
    );

    println!("\nAccess checks");
    for permission in Permission::ordered() {
        let allowed = policy.can_access(&agent, permission);
        println!(
            "- {}: {}",
            permission.label(),
            if allowed { "allowed" } else { "denied" }
        );
    }

    let analytics = FeatureGate::new(Permission::ViewMarketAnalytics);
    if let FeatureGateOutcome::Blocked(message) = analytics.evaluate(&policy, Some(&agent)) {
        println!("- analytics panel blocked: {}", message.text());
    }

    let notifier = Arc::new(RecordingNotifier::default());
    let invitations = InvitationService::new(
        Arc::new(InMemoryInvitationRepository::default()),
        notifier.clone(),
    );

    println!("\nInvitation workflow");
    let invitation = invitations
        .send_invite(InviteRequest {
            sender_id: agent.user_id.clone(),
            tenant_id: tenant_id.clone(),
            listing_id: listing_id.clone(),
            message: Some("We think this unit fits your search.".to_string()),
        })
        .await?;
    println!(
        "- created {} for tenant {} (status {})",
        invitation.id.0,
        invitation.tenant_id,
        invitation.status.label()
    );
    println!(
        "- notifications attempted: {}",
        notifier.delivered().len()
    );

    if !skip_showings {
        println!("\nShowing workflow");
        let showings = ShowingService::new(Arc::new(InMemoryShowingRepository::default()));
        let requested_date = Local::now().date_naive() + Duration::days(3);
        let requested_time = NaiveTime::from_hms_opt(10, 30, 0).unwrap_or_default();

        let outcome = showings
            .request_showing(ShowingRequest {
                listing_id: listing_id.clone(),
                tenant_id: tenant_id.clone(),
                requested_date,
                requested_time,
                message: None,
            })?;
        let id = outcome.showing.id.clone();
        println!("- requested {} for {}", id.0, requested_date);

        let confirmed = showings
            .update_status(&id, ShowingStatus::Confirmed, Some("Lockbox 4411".to_string()))?;
        println!("- status now {}", confirmed.showing.status.label());

        let rescheduled = showings
            .reschedule(&id, requested_date + Duration::days(1), requested_time)?;
        println!(
            "- rescheduled to {} (status {})",
            rescheduled
                .showing
                .actual_date
                .map(|date| date.to_string())
                .unwrap_or_default(),
            rescheduled.showing.status.label()
        );
    }

    println!("\nDirectory filters");
    let tenants = sample_tenants();
    let query = TenantQuery {
        min_income: Some(1000),
        max_income: Some(6000),
        pets: PetsFilter::Without,
        ..TenantQuery::default()
    };
    for tenant in query.apply(&tenants) {
        println!(
            "- {} ({}), income {}",
            tenant.tenant_id,
            tenant.email,
            tenant
                .household_income
                .map(|income| income.to_string())
                .unwrap_or_else(|| "undeclared".to_string())
        );
    }

    Ok(())
}
