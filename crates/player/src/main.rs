//! Ethics Bowl Academy Player - composition root binary.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chrono::Utc;
use ethicsbowl_domain::{
    ModuleId, SortingBucket, SortingCard, SortingDefinition, Step, StepContent, UserId,
};
use ethicsbowl_player::application::services::StepService;
use ethicsbowl_player::infrastructure::{DocumentApiAdapter, InMemoryStepRepository};
use ethicsbowl_player::ports::outbound::StepRepositoryPort;
use ethicsbowl_player::ui::{self, SessionContext};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ethicsbowl_player=debug,dioxus=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Ethics Bowl Academy Player");

    let module_id = ModuleId::new();
    let author = UserId::new();

    // With no backend configured, run against a seeded in-memory store.
    let repository: Arc<dyn StepRepositoryPort> = match std::env::var("EBA_API_URL") {
        Ok(base_url) => {
            tracing::info!(%base_url, "Using document API backend");
            Arc::new(DocumentApiAdapter::new(base_url))
        }
        Err(_) => {
            tracing::info!("EBA_API_URL not set, using in-memory store with demo data");
            let repo = InMemoryStepRepository::new();
            repo.seed(demo_sorting_step(module_id, author));
            Arc::new(repo)
        }
    };

    let services = ui::presentation::Services {
        steps: Arc::new(StepService::new(repository)),
    };

    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus_desktop::Config::new())
        .with_context(services)
        .with_context(SessionContext { module_id, author })
        .launch(ui::app);
}

fn demo_sorting_step(module_id: ModuleId, author: UserId) -> Step {
    let definition = SortingDefinition::new(
        "Sort each claim into the ethical framework it best represents.",
    )
    .with_bucket(SortingBucket::new("Utilitarianism"))
    .with_bucket(SortingBucket::new("Deontology"))
    .with_bucket(SortingBucket::new("Virtue Ethics"))
    .with_card(SortingCard::new(
        "The right action is the one that produces the most overall happiness.",
    ))
    .with_card(SortingCard::new(
        "Some actions are wrong no matter how good their consequences are.",
    ))
    .with_card(SortingCard::new(
        "Act as an honest and courageous person would act.",
    ));

    let cards: Vec<_> = definition.cards().iter().map(|c| c.id).collect();
    let buckets: Vec<_> = definition.buckets().iter().map(|b| b.id).collect();
    let definition = definition
        .with_answer(cards[0], buckets[0])
        .with_answer(cards[1], buckets[1])
        .with_answer(cards[2], buckets[2]);

    Step::new(
        module_id,
        "Ethical Frameworks",
        author,
        StepContent::Sorting(definition),
        Utc::now(),
    )
}
