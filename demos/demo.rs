use skrybe_client::{CampaignOptions, Client, PageOptions, SendEmailOptions, Subscriber};

#[tokio::main]
async fn main() -> Result<(), skrybe_client::Error> {
    let api_key = std::env::args()
        .nth(1)
        .expect("usage: demo <api-key> [list-id]");
    let list_id = std::env::args().nth(2);

    let client = Client::new(api_key)?;

    let lists = client.get_lists(true).await?;
    println!("Lists: {lists:?}");

    let campaigns = client
        .get_campaigns(Some(&PageOptions::default().limit(5)))
        .await?;
    println!("Campaigns: {campaigns:?}");

    if let Some(list_id) = &list_id {
        let subscribers = client.get_subscribers(list_id, None).await?;
        println!("Subscribers: {subscribers:?}");

        let added = client
            .add_subscriber(list_id, &Subscriber::new("demo@example.com").name("Demo"))
            .await?;
        println!("Add subscriber: {added:?}");

        let draft = CampaignOptions {
            from_name: Some("Demo".into()),
            from_email: Some("demo@example.com".into()),
            title: Some("Demo draft".into()),
            subject: Some("Hello from Rust".into()),
            html_text: Some("<p>Hello</p>".into()),
            list_ids: Some(vec![list_id.clone()]),
            send_campaign: Some(false),
            ..Default::default()
        };
        println!("Campaign: {:?}", client.create_campaign(&draft).await?);
    }

    let email = SendEmailOptions {
        from_name: Some("Demo".into()),
        from_email: Some("demo@example.com".into()),
        subject: Some("Hello from Rust".into()),
        html_text: Some("<p>Hello</p>".into()),
        to: Some("demo@example.com".into()),
        ..Default::default()
    };
    match client.send_email(&email).await {
        Ok(response) => println!("Sent: {response:?}"),
        Err(e) if e.is_validation() => eprintln!("Rejected locally: {e}"),
        Err(e) => return Err(e),
    }

    Ok(())
}
