use std::path::PathBuf;

use pressbed::{
    filters::DCT_DECODE,
    pdf::{dictionary, Array, Dictionary, Name, Object, Stream},
    DocumentInfo, DocumentOptions, DocumentState, EncryptionKey, ObjectStore,
};
use structopt::StructOpt;

/// Write a one page sample document.
#[derive(StructOpt, Debug)]
#[structopt(name = "render")]
struct Opt {
    /// Output file
    #[structopt(short, long, parse(from_os_str))]
    output: PathBuf,

    /// Flate encode content streams
    #[structopt(short, long)]
    compress: bool,

    /// Encryption key as hex digits
    #[structopt(short, long)]
    key: Option<String>,

    /// JPEG file placed on the page, streamed from disk
    #[structopt(long, parse(from_os_str))]
    jpeg: Option<PathBuf>,

    /// Pixel size of the JPEG as WIDTHxHEIGHT
    #[structopt(long, default_value = "100x100")]
    jpeg_size: String,
}

fn image_size(size: &str) -> Option<(i64, i64)> {
    let (w, h) = size.split_once('x')?;
    Some((w.parse().ok()?, h.parse().ok()?))
}

pub fn main() {
    env_logger::init();
    let opt = Opt::from_args();

    let mut options = DocumentOptions::default().compress(opt.compress).info(DocumentInfo {
        title: Some("pressbed sample".into()),
        ..Default::default()
    });
    if let Some(key) = &opt.key {
        match EncryptionKey::from_hex(key) {
            Some(key) => options = options.encryption_key(key),
            None => {
                log::error!("key must be 1 to 16 bytes of hex");
                return;
            }
        }
    }
    let mut doc = DocumentState::new(options);

    let font = doc.store_mut().push_object(Object::Dictionary(dictionary([
        (b"Type".as_slice(), Object::Name(Name::from("Font"))),
        (b"Subtype".as_slice(), Object::Name(Name::from("Type1"))),
        (b"BaseFont".as_slice(), Object::Name(Name::from("Helvetica"))),
    ])));
    let mut resources = dictionary([(
        b"Font".as_slice(),
        Object::Dictionary(dictionary([(b"F1".as_slice(), Object::Reference(font))])),
    )]);
    let mut content = b"BT /F1 24 Tf 72 720 Td (Hello from pressbed) Tj ET\n".to_vec();

    if let Some(path) = &opt.jpeg {
        let (width, height) = match image_size(&opt.jpeg_size) {
            Some(size) => size,
            None => {
                log::error!("invalid image size `{}`", opt.jpeg_size);
                return;
            }
        };
        let image = match Stream::from_file(
            dictionary([
                (b"Type".as_slice(), Object::Name(Name::from("XObject"))),
                (b"Subtype".as_slice(), Object::Name(Name::from("Image"))),
                (b"Width".as_slice(), Object::Integer(width)),
                (b"Height".as_slice(), Object::Integer(height)),
                (b"ColorSpace".as_slice(), Object::Name(Name::from("DeviceRGB"))),
                (b"BitsPerComponent".as_slice(), Object::Integer(8)),
                (b"Filter".as_slice(), Object::Name(Name::from(DCT_DECODE))),
            ]),
            path,
        ) {
            Ok(image) => image,
            Err(e) => {
                log::error!("cannot use {}: {}", path.display(), e);
                return;
            }
        };
        let image = doc.store_mut().push_object(Object::Stream(image));
        resources.insert(
            Name::from("XObject"),
            Object::Dictionary(dictionary([(b"Im1".as_slice(), Object::Reference(image))])),
        );
        let draw = format!("q {} 0 0 {} 72 400 cm /Im1 Do Q\n", width, height);
        content.extend_from_slice(draw.as_bytes());
    }

    let contents = doc
        .store_mut()
        .push_object(Object::Stream(Stream::new(Dictionary::default(), content)));
    let page = dictionary([
        (
            b"MediaBox".as_slice(),
            Object::Array(Array::from(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ])),
        ),
        (b"Resources".as_slice(), Object::Dictionary(resources)),
        (b"Contents".as_slice(), Object::Reference(contents)),
    ]);

    doc.add_before_render(|doc| log::debug!("rendering {} pages", doc.page_count()));
    if let Err(e) = doc.start_new_page(page) {
        log::error!("cannot add page: {}", e);
        return;
    }

    log::debug!("Write {}", opt.output.display());
    if let Err(e) = doc.render_file(&opt.output) {
        log::error!("render failed: {}", e);
    }
}
