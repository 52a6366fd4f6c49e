/// duel3d Web - WebGL frontend for the cube viewer and the robot fight
///
/// The page owns the animation loop: it forwards `keydown` / `keyup` names and
/// calls `frame` from `requestAnimationFrame`.
use std::time::Duration;

use duel3d_core::arena::{arena_scene, Primitive, CLEAR_COLOR};
use duel3d_core::{random_face_colors, Arena, Camera, ClipVolume, CubeViewer, ViewerSettings};
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, WebGlBuffer, WebGlUniformLocation};

mod error;
mod gl;

pub use crate::error::Error;
use crate::gl::{ShaderProgram, GL};

const BANNER_HIDDEN: &str = "position: absolute; top: 10px; left: 50%; \
    transform: translateX(-50%); color: white; font-size: 24px; display: none;";
const BANNER_VISIBLE: &str = "position: absolute; top: 10px; left: 50%; \
    transform: translateX(-50%); color: white; font-size: 24px; display: block;";

fn document() -> Result<Document, Error> {
    web_sys::window()
        .ok_or(Error::UnableToRetrieveWindow)?
        .document()
        .ok_or(Error::UnableToRetrieveDocument)
}

fn canvas_context(document: &Document, canvas_id: &str) -> Result<(HtmlCanvasElement, GL), Error> {
    let canvas = document
        .get_element_by_id(canvas_id)
        .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok())
        .ok_or_else(|| Error::UnableToRetrieveCanvas(canvas_id.to_string()))?;

    let gl = canvas
        .get_context("webgl")
        .ok()
        .flatten()
        .and_then(|context| context.dyn_into::<GL>().ok())
        .ok_or(Error::FailedToRetrieveWebGlRenderingContext)?;

    Ok((canvas, gl))
}

/// Four coloured cubes orbiting the y axis
#[wasm_bindgen]
pub struct WebCubeViewer {
    gl: GL,
    matrix: WebGlUniformLocation,
    vertex_count: usize,
    viewer: CubeViewer,
}

impl WebCubeViewer {
    fn create(canvas_id: &str) -> Result<Self, Error> {
        let (canvas, gl) = canvas_context(&document()?, canvas_id)?;

        let program = ShaderProgram::link(&gl, gl::CUBE_VERTEX_SHADER, gl::CUBE_FRAGMENT_SHADER)?;
        program.use_program(&gl);
        gl.enable(GL::DEPTH_TEST);

        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        let viewer = CubeViewer::new(
            Camera::default(),
            ClipVolume::default(),
            ViewerSettings::default(),
            &random_face_colors(seed),
        );

        let positions = gl::create_buffer(&gl)?;
        gl::upload(&gl, &positions, &viewer.mesh().positions(), GL::STATIC_DRAW);
        gl::bind_attribute(&gl, &positions, program.attribute(&gl, "position")?, 3);

        let colors = gl::create_buffer(&gl)?;
        gl::upload(&gl, &colors, &viewer.mesh().colors(), GL::STATIC_DRAW);
        gl::bind_attribute(&gl, &colors, program.attribute(&gl, "color")?, 3);

        let matrix = program.uniform(&gl, "matrix")?;
        gl.clear_color(1.0, 1.0, 1.0, 1.0);
        gl.viewport(0, 0, canvas.width() as i32, canvas.height() as i32);

        info!(seed, "cube viewer ready");
        Ok(Self {
            gl,
            matrix,
            vertex_count: viewer.mesh().vertex_count(),
            viewer,
        })
    }
}

#[wasm_bindgen]
impl WebCubeViewer {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebCubeViewer, JsValue> {
        Ok(Self::create(canvas_id)?)
    }

    /// `1` selects orthographic, `2` perspective
    pub fn key_down(&mut self, key: &str) -> bool {
        self.viewer.key_down(key)
    }

    pub fn key_up(&mut self, _key: &str) -> bool {
        false
    }

    pub fn frame(&mut self, _timestamp_ms: f64) {
        self.gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
        self.viewer.advance();
        for matrix in self.viewer.frame_matrices() {
            self.gl
                .uniform_matrix4fv_with_f32_array(Some(&self.matrix), false, matrix.as_slice());
            gl::draw(&self.gl, Primitive::Triangles, self.vertex_count);
        }
    }
}

/// The two-player robot fight
#[wasm_bindgen]
pub struct WebArena {
    gl: GL,
    buffer: WebGlBuffer,
    translation: WebGlUniformLocation,
    color: WebGlUniformLocation,
    banner: Element,
    banner_text: BannerText,
    arena: Arena,
}

/// Last text written to the banner element; `None` while hidden
#[derive(Debug, Default)]
struct BannerText {
    shown: Option<String>,
}

impl BannerText {
    /// Records `text` and returns whether it differs from what is shown
    fn update(&mut self, text: Option<String>) -> bool {
        if self.shown == text {
            return false;
        }
        self.shown = text;
        true
    }

    fn style(&self) -> &'static str {
        if self.shown.is_some() {
            BANNER_VISIBLE
        } else {
            BANNER_HIDDEN
        }
    }
}

impl WebArena {
    fn create(canvas_id: &str) -> Result<Self, Error> {
        let document = document()?;
        let (canvas, gl) = canvas_context(&document, canvas_id)?;

        if let Some(window) = web_sys::window() {
            let inner = |size: Result<JsValue, JsValue>| size.ok().and_then(|v| v.as_f64());
            if let (Some(width), Some(height)) = (inner(window.inner_width()), inner(window.inner_height())) {
                canvas.set_width(width as u32);
                canvas.set_height(height as u32);
            }
        }
        gl.viewport(0, 0, canvas.width() as i32, canvas.height() as i32);

        let program = ShaderProgram::link(&gl, gl::SHAPE_VERTEX_SHADER, gl::SHAPE_FRAGMENT_SHADER)?;
        program.use_program(&gl);

        let buffer = gl::create_buffer(&gl)?;
        gl::bind_attribute(&gl, &buffer, program.attribute(&gl, "a_position")?, 2);
        let translation = program.uniform(&gl, "u_translation")?;
        let color = program.uniform(&gl, "u_color")?;

        let banner = document
            .create_element("div")
            .map_err(|_| Error::ElementCreationError("div"))?;
        banner
            .set_attribute("style", BANNER_HIDDEN)
            .map_err(|_| Error::ElementCreationError("div"))?;
        document
            .body()
            .ok_or(Error::UnableToRetrieveBody)?
            .append_child(&banner)
            .map_err(|_| Error::ElementCreationError("div"))?;

        info!("arena ready");
        Ok(Self {
            gl,
            buffer,
            translation,
            color,
            banner,
            banner_text: BannerText::default(),
            arena: Arena::default(),
        })
    }

    fn refresh_banner(&mut self) {
        if !self.banner_text.update(self.arena.banner()) {
            return;
        }
        if let Some(text) = &self.banner_text.shown {
            self.banner.set_text_content(Some(text.as_str()));
        }
        if let Err(err) = self.banner.set_attribute("style", self.banner_text.style()) {
            warn!(?err, "failed to update banner style");
        }
    }
}

#[wasm_bindgen]
impl WebArena {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebArena, JsValue> {
        Ok(Self::create(canvas_id)?)
    }

    /// Returns whether the key is bound
    pub fn key_down(&mut self, key: &str) -> bool {
        self.arena.key_down(key)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.arena.key_up(key)
    }

    pub fn frame(&mut self, timestamp_ms: f64) {
        self.arena.tick(Duration::from_secs_f64(timestamp_ms.max(0.0) / 1000.0));
        self.refresh_banner();

        let [r, g, b, a] = CLEAR_COLOR;
        self.gl.clear_color(r, g, b, a);
        self.gl.clear(GL::COLOR_BUFFER_BIT);

        for shape in arena_scene(self.arena.state()) {
            gl::upload(&self.gl, &self.buffer, &shape.flat_vertices(), GL::DYNAMIC_DRAW);
            self.gl.uniform4fv_with_f32_array(Some(&self.color), &shape.color);
            let [x, y] = shape.offset;
            self.gl.uniform2f(Some(&self.translation), x, y);
            gl::draw(&self.gl, shape.primitive, shape.vertices.len());
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    console_error_panic_hook::set_once();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .without_time()
                .with_writer(tracing_web::MakeWebConsoleWriter::new()),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_written_only_on_change() {
        let mut banner = BannerText::default();
        assert_eq!(banner.style(), BANNER_HIDDEN);
        assert!(!banner.update(None));

        assert!(banner.update(Some("Player 1 wins!".to_string())));
        assert_eq!(banner.style(), BANNER_VISIBLE);
        // the same winner on later frames leaves the element alone
        assert!(!banner.update(Some("Player 1 wins!".to_string())));

        assert!(banner.update(None));
        assert_eq!(banner.style(), BANNER_HIDDEN);
    }

    #[test]
    fn test_arena_clears_to_opaque_black() {
        assert_eq!(CLEAR_COLOR, [0.0, 0.0, 0.0, 1.0]);
    }
}
