use payment_form::application::challenge::NavigationEvent;
use payment_form::application::session::{CheckoutSession, SessionEvent, SessionOutput};
use payment_form::application::wizard::WizardEvent;
use payment_form::config::{ChallengeConfig, FormConfig};
use payment_form::domain::field_store::Field;
use payment_form::domain::ports::{IndicatorBox, SurfaceBox, SurfaceFactory};
use payment_form::infrastructure::in_memory::{InMemoryIndicator, InMemorySurface};
use tokio::sync::mpsc;

#[tokio::test]
async fn test_session_runs_on_spawned_task() {
    let config = FormConfig {
        challenge: ChallengeConfig {
            success_pattern: "cko-success".to_string(),
            failure_pattern: "cko-fail".to_string(),
        },
        ..FormConfig::default()
    };

    let indicator = InMemoryIndicator::new();
    let surface = InMemorySurface::new();
    let factory_surface = surface.clone();
    let indicator_box: IndicatorBox = Box::new(indicator.clone());
    let factory: SurfaceFactory = Box::new(move || Box::new(factory_surface.clone()) as SurfaceBox);

    let session = CheckoutSession::new(&config, indicator_box, factory);
    let (event_tx, event_rx) = mpsc::channel(4);
    let (output_tx, mut output_rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(session.run(event_rx, output_tx));

    let events = vec![
        SessionEvent::SetField(Field::CardNumber, "4242 4242 4242 4242".to_string()),
        SessionEvent::Wizard(WizardEvent::DetailsCompleted),
        SessionEvent::StartChallenge("https://acs.example".to_string()),
        SessionEvent::Navigation(NavigationEvent::Started {
            url: "https://acs.example".to_string(),
        }),
        SessionEvent::AbortChallenge,
        SessionEvent::Navigation(NavigationEvent::Finished {
            url: "https://m/cko-success?cko-payment-token=late".to_string(),
        }),
    ];
    for event in events {
        event_tx.send(event).await.unwrap();
    }
    drop(event_tx);

    let session = handle.await.unwrap();
    assert!(!session.challenge().is_settled());

    let mut outputs = Vec::new();
    while let Some(output) = output_rx.recv().await {
        outputs.push(output);
    }
    assert_eq!(outputs.len(), 2);
    assert!(matches!(outputs[0], SessionOutput::Submitted { .. }));
    assert_eq!(
        outputs[1],
        SessionOutput::PrimaryViewVisible { visible: false }
    );

    assert!(!surface.snapshot().attached);
    assert!(!indicator.snapshot().visible);
}
