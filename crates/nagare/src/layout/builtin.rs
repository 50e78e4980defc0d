//! Built-in component types.
//!
//! | Tag                | Default size | Holds children |
//! |--------------------|--------------|----------------|
//! | `Browser`          | 640 × 420    | yes            |
//! | `VM`               | 640 × 420    | yes            |
//! | `Server`           | 200 × 50     | no             |
//! | `Terminal`         | 320 × 200    | no             |
//! | `Database`         | 160 × 120    | no             |
//! | `MessageQueue`     | 200 × 80     | no             |
//! | `CDN`              | 200 × 80     | no             |
//! | `APIGateway`       | 200 × 80     | no             |
//! | `BackgroundWorker` | 200 × 80     | no             |
//! | `Package`          | 160 × 100    | no             |
//! | `Artifact`         | 160 × 100    | no             |
//! | `Rectangle`        | 120 × 60     | no             |

use std::marker::PhantomData;

use nagare_core::{
    color::Color,
    geometry::Size,
    properties::{self, Field, PropertyError, PropertySchema},
};

use super::registry::{ComponentFactory, ComponentProps, DisplaySchema, PropertyValue};

/// Declares a display property record together with its schema.
///
/// Every field is optional. A field may name a default, written the way it
/// would appear in a property block. Defaults go through the same parser as
/// block values and are reported by [`DisplaySchema::values`] for unset
/// fields.
macro_rules! display_schema {
    (@type text) => { String };
    (@type color) => { Color };
    (@type integer) => { i64 };

    (@parse text, $key:literal, $value:expr) => { Ok::<String, PropertyError>($value.to_string()) };
    (@parse color, $key:literal, $value:expr) => { properties::parse_color($key, $value) };
    (@parse integer, $key:literal, $value:expr) => { properties::parse_integer($key, $value) };

    (
        $(#[$meta:meta])*
        $name:ident {
            $($key:literal => $field:ident: $kind:ident $(= $default:literal)?),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $(pub $field: Option<display_schema!(@type $kind)>,)*
        }

        impl PropertySchema for $name {
            const FIELDS: &'static [Field<Self>] = &[
                $(Field {
                    key: $key,
                    apply: |props: &mut Self, value: &str| {
                        props.$field = Some(display_schema!(@parse $kind, $key, value)?);
                        Ok(())
                    },
                },)*
            ];
        }

        impl DisplaySchema for $name {
            fn values(&self) -> Vec<(&'static str, PropertyValue)> {
                let mut values = Vec::new();
                $(
                    match &self.$field {
                        Some(value) => values.push(($key, PropertyValue::from(value.clone()))),
                        None => {
                            $(
                                if let Ok(value) = display_schema!(@parse $kind, $key, $default) {
                                    values.push(($key, PropertyValue::from(value)));
                                }
                            )?
                        }
                    }
                )*
                values
            }
        }
    };
}

display_schema! {
    /// Display properties of a browser window.
    BrowserProps {
        "url" => url: text,
        "bg" => bg: color = "#e6f3ff",
        "fg" => fg: color = "#333333",
        "contentBg" => content_bg: color = "#ffffff",
        "text" => text: text,
    }
}

display_schema! {
    /// Display properties of a virtual machine frame.
    VmProps {
        "title" => title: text,
        "bg" => bg: color = "#e6f3ff",
        "fg" => fg: color = "#333333",
        "contentBg" => content_bg: color = "#ccc",
        "text" => text: text,
    }
}

display_schema! {
    /// Display properties of a server box.
    ServerProps {
        "title" => title: text,
        "icon" => icon: text = "default",
        "port" => port: integer = "80",
        "bg" => bg: color = "#e6f3ff",
        "fg" => fg: color = "#333333",
    }
}

display_schema! {
    TerminalProps {
        "title" => title: text = "Terminal",
        "cwd" => cwd: text = "~/project",
        "command" => command: text = "go run main.go",
        "prompt" => prompt: text = "$",
        "bg" => bg: color = "#0f172a",
        "fg" => fg: color = "#f8fafc",
        "accent" => accent: color = "#38bdf8",
    }
}

display_schema! {
    DatabaseProps {
        "title" => title: text = "Database",
        "engine" => engine: text = "PostgreSQL",
        "bg" => bg: color = "#0f766e",
        "fg" => fg: color = "#ecfdf5",
        "accent" => accent: color = "#14b8a6",
    }
}

display_schema! {
    /// Display properties of a message queue. `kind` names the broker.
    QueueProps {
        "title" => title: text = "Queue",
        "kind" => kind: text = "RabbitMQ",
        "bg" => bg: color = "#4c1d95",
        "fg" => fg: color = "#ede9fe",
        "accent" => accent: color = "#a855f7",
    }
}

display_schema! {
    /// Display properties of an edge network or CDN.
    CdnProps {
        "title" => title: text = "Edge",
        "provider" => provider: text = "Cloudflare",
        "region" => region: text = "Global",
        "bg" => bg: color = "#1d4ed8",
        "fg" => fg: color = "#eff6ff",
        "accent" => accent: color = "#60a5fa",
    }
}

display_schema! {
    GatewayProps {
        "title" => title: text = "API Gateway",
        "route" => route: text = "/api",
        "method" => method: text = "ANY",
        "bg" => bg: color = "#312e81",
        "fg" => fg: color = "#eef2ff",
        "accent" => accent: color = "#6366f1",
    }
}

display_schema! {
    /// Display properties of a scheduled background job.
    WorkerProps {
        "title" => title: text = "Worker",
        "job" => job: text = "process-emails",
        "schedule" => schedule: text = "@every 1m",
        "bg" => bg: color = "#166534",
        "fg" => fg: color = "#dcfce7",
        "accent" => accent: color = "#22c55e",
    }
}

display_schema! {
    PackageProps {
        "title" => title: text = "Package",
        "version" => version: text = "1.0.0",
        "lang" => lang: text = "Go",
        "bg" => bg: color = "#92400e",
        "fg" => fg: color = "#fef3c7",
        "accent" => accent: color = "#f97316",
    }
}

display_schema! {
    /// Display properties of a build artifact. `size` is display text, not geometry.
    ArtifactProps {
        "title" => title: text = "Artifact",
        "filename" => filename: text = "build.tar.gz",
        "size" => size: text = "24 MB",
        "bg" => bg: color = "#1f2937",
        "fg" => fg: color = "#f9fafb",
        "accent" => accent: color = "#9ca3af",
    }
}

display_schema! {
    /// Display properties of the generic rectangle.
    RectangleProps {
        "title" => title: text,
        "bg" => bg: color = "#e6f3ff",
        "fg" => fg: color = "#333333",
    }
}

/// A factory for one of the built-in schemas.
struct Builtin<T> {
    type_tag: &'static str,
    size: Size,
    can_contain: bool,
    schema: PhantomData<fn() -> T>,
}

impl<T> Builtin<T> {
    fn new(type_tag: &'static str, width: f32, height: f32) -> Self {
        Self {
            type_tag,
            size: Size::new(width, height),
            can_contain: false,
            schema: PhantomData,
        }
    }

    fn container(mut self) -> Self {
        self.can_contain = true;
        self
    }
}

impl<T: DisplaySchema + 'static> ComponentFactory for Builtin<T> {
    fn type_tag(&self) -> &str {
        self.type_tag
    }

    fn default_size(&self) -> Size {
        self.size
    }

    fn can_contain(&self) -> bool {
        self.can_contain
    }

    fn create(&self) -> Box<dyn ComponentProps> {
        Box::new(T::default())
    }
}

pub(super) fn rectangle() -> Box<dyn ComponentFactory> {
    Box::new(Builtin::<RectangleProps>::new("Rectangle", 120.0, 60.0))
}

pub(super) fn factories() -> Vec<Box<dyn ComponentFactory>> {
    vec![
        Box::new(Builtin::<BrowserProps>::new("Browser", 640.0, 420.0).container()),
        Box::new(Builtin::<VmProps>::new("VM", 640.0, 420.0).container()),
        Box::new(Builtin::<ServerProps>::new("Server", 200.0, 50.0)),
        Box::new(Builtin::<TerminalProps>::new("Terminal", 320.0, 200.0)),
        Box::new(Builtin::<DatabaseProps>::new("Database", 160.0, 120.0)),
        Box::new(Builtin::<QueueProps>::new("MessageQueue", 200.0, 80.0)),
        Box::new(Builtin::<CdnProps>::new("CDN", 200.0, 80.0)),
        Box::new(Builtin::<GatewayProps>::new("APIGateway", 200.0, 80.0)),
        Box::new(Builtin::<WorkerProps>::new("BackgroundWorker", 200.0, 80.0)),
        Box::new(Builtin::<PackageProps>::new("Package", 160.0, 100.0)),
        Box::new(Builtin::<ArtifactProps>::new("Artifact", 160.0, 100.0)),
        rectangle(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> PropertyValue {
        PropertyValue::Text(value.to_string())
    }

    fn color(value: &str) -> PropertyValue {
        PropertyValue::Color(Color::new(value).unwrap())
    }

    #[test]
    fn test_server_defaults_and_override() {
        let defaults = ServerProps::default();
        assert_eq!(
            defaults.values(),
            vec![
                ("icon", text("default")),
                ("port", PropertyValue::Integer(80)),
                ("bg", color("#e6f3ff")),
                ("fg", color("#333333")),
            ]
        );

        let server: ServerProps =
            properties::parse(r##"(title: "App Server", port: 8080, fg: "#000")"##).unwrap();
        assert_eq!(
            server.values(),
            vec![
                ("title", text("App Server")),
                ("icon", text("default")),
                ("port", PropertyValue::Integer(8080)),
                ("bg", color("#e6f3ff")),
                ("fg", color("#000")),
            ]
        );
    }

    #[test]
    fn test_server_malformed_port() {
        assert!(properties::parse::<ServerProps>("port: http").is_err());
    }

    #[test]
    fn test_browser_colors_are_validated() {
        let browser: BrowserProps =
            properties::parse("url: https://www.nagare.com, contentBg: #e6f3ff").unwrap();
        assert_eq!(browser.url.as_deref(), Some("https://www.nagare.com"));
        assert_eq!(browser.content_bg.as_ref().map(Color::as_str), Some("#e6f3ff"));

        assert!(properties::parse::<BrowserProps>("bg: nope").is_err());
    }

    #[test]
    fn test_vm_content_background_default() {
        let values = VmProps::default().values();
        assert!(values.contains(&("contentBg", color("#ccc"))));
        assert!(!values.iter().any(|(key, _)| *key == "title"));
    }

    #[test]
    fn test_terminal_keeps_quoted_whitespace() {
        let terminal: TerminalProps =
            properties::parse(r#"prompt: "$ ", cwd: '~/src'"#).unwrap();
        assert_eq!(terminal.prompt.as_deref(), Some("$ "));
        assert_eq!(terminal.cwd.as_deref(), Some("~/src"));

        let values = terminal.values();
        assert_eq!(values[0], ("title", text("Terminal")));
        assert!(values.contains(&("prompt", text("$ "))));
    }

    #[test]
    fn test_infrastructure_defaults() {
        let cdn = CdnProps::default().values();
        assert_eq!(&cdn[..3], &[
            ("title", text("Edge")),
            ("provider", text("Cloudflare")),
            ("region", text("Global")),
        ]);

        let gateway: GatewayProps = properties::parse("route: /v2, method: POST").unwrap();
        assert_eq!(&gateway.values()[..3], &[
            ("title", text("API Gateway")),
            ("route", text("/v2")),
            ("method", text("POST")),
        ]);

        let worker = WorkerProps::default().values();
        assert!(worker.contains(&("schedule", text("@every 1m"))));

        let package: PackageProps = properties::parse("lang: Rust").unwrap();
        assert!(package.values().contains(&("lang", text("Rust"))));
        assert!(package.values().contains(&("version", text("1.0.0"))));

        let artifact = ArtifactProps::default().values();
        assert!(artifact.contains(&("size", text("24 MB"))));
        assert!(artifact.contains(&("accent", color("#9ca3af"))));
    }

    #[test]
    fn test_every_default_is_reported() {
        // Each schema reports one value per field that declares a default
        for factory in factories() {
            let values = factory.create().to_values();
            assert!(
                values.iter().any(|(key, _)| *key == "fg"),
                "{} lost its fg default",
                factory.type_tag()
            );
        }
    }

    #[test]
    fn test_builtin_sizes() {
        let sizes: Vec<_> = factories()
            .iter()
            .map(|f| (f.type_tag().to_string(), f.default_size(), f.can_contain()))
            .collect();
        assert_eq!(sizes.len(), 12);
        assert_eq!(sizes[0], ("Browser".to_string(), Size::new(640.0, 420.0), true));
        assert_eq!(sizes[2], ("Server".to_string(), Size::new(200.0, 50.0), false));
        assert_eq!(sizes[6], ("CDN".to_string(), Size::new(200.0, 80.0), false));
        assert_eq!(sizes[7], ("APIGateway".to_string(), Size::new(200.0, 80.0), false));
        assert_eq!(sizes[8], ("BackgroundWorker".to_string(), Size::new(200.0, 80.0), false));
        assert_eq!(sizes[9], ("Package".to_string(), Size::new(160.0, 100.0), false));
        assert_eq!(sizes[10], ("Artifact".to_string(), Size::new(160.0, 100.0), false));
        assert_eq!(sizes[11], ("Rectangle".to_string(), Size::new(120.0, 60.0), false));
    }
}
