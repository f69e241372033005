use std::{fs, path::Path};

use kotobuki::{Kotobuki, Locale, RenderOptions, TemplateLoader, WeddingData};

fn main() -> kotobuki::Result<()> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let fixtures = root.join("tests/fixtures");
    let dist = root.join("demos/dist");

    let mut loader = TemplateLoader::new(fixtures.join("templates"))?;
    let data = WeddingData::from_json(&fs::read_to_string(fixtures.join("wedding.json"))?)?;

    for locale in [Locale::ZhCn, Locale::EnUs] {
        let invitation = Kotobuki::from_template(loader.load("classic")?).with_options(
            RenderOptions::default()
                .with_locale(locale)
                .with_asset_base("https://cdn.example.com/w-2024-0520"),
        );
        let page = invitation.render_wedding(&data)?;

        let path = dist.join(format!("classic.{}.html", locale.tag()));
        fs::create_dir_all(&dist)?;
        fs::write(&path, wrap_document(&page.to_html(), locale))?;
        println!("{} sections -> {}", page.blocks.len(), path.display());
    }
    Ok(())
}

fn wrap_document(body: &str, locale: Locale) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"></head>\n\
         <body>{}</body>\n</html>\n",
        locale.tag(),
        body
    )
}
