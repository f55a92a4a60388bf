mod subscription_tests;

use crate::schema::Schema;

const RATINGS_SDL: &str = r#"
type Query { chef: String }

type Subscription {
  ratingChanged(id: Int!): Rating
  ticks: Int!
  broken: Int
}

type Rating { id: Int!, stars: Int }

interface Scored { stars: Int }
"#;

/// Routes engine spans and events to the test harness output.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

fn ratings_schema() -> Schema {
    Schema::builder()
        .load_str(None, RATINGS_SDL)
        .expect("ratings schema loads")
        .build()
        .expect("ratings schema builds")
}
