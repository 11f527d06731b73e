use seal_messenger::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = MessengerConfig::from_env()?;

    // 两个用户各自生成密钥
    let mut alice: InteractionController =
        InteractionController::new(config.clone(), MemoryClipboard::new());
    let mut bob: InteractionController = InteractionController::new(config, MemoryClipboard::new());
    alice.generate_keys()?;
    bob.generate_keys()?;

    // Bob 把公钥交给 Alice，Alice 加密后发回载荷
    bob.dispatch(UiAction::Copy(Field::PublicKey))?;
    let bob_public = bob.clipboard().contents().unwrap_or_default().to_string();

    alice.select_tab(Tab::Send);
    alice.set_field(Field::RecipientPublicKey, bob_public);
    alice.set_field(Field::MessageToSend, "Ciao Bob, ci vediamo alle 12.");
    let payload = alice.encrypt_message()?;
    println!("Ciphertext (Base64): {}", payload);

    bob.select_tab(Tab::Receive);
    bob.set_field(Field::EncryptedMessageReceived, payload.as_str());
    let plaintext = bob.decrypt_message()?;
    println!("Decrypted: {}", plaintext);

    // 导出 Bob 的密钥
    let store = KeyFileStore::new(std::env::temp_dir().join("seal-messenger"))?;
    let path = bob.export_keys(&store)?;
    println!("Keys exported to {}", path.display());

    Ok(())
}
