use duel3d_core::arena::Primitive;
use web_sys::{WebGlBuffer, WebGlProgram, WebGlShader, WebGlUniformLocation};

use crate::error::Error;

pub(crate) type GL = web_sys::WebGlRenderingContext;

/// Per-vertex position and colour through one matrix, for the cubes
pub(crate) const CUBE_VERTEX_SHADER: &str = r#"
precision mediump float;

attribute vec3 position;
attribute vec3 color;
varying vec3 vColor;

uniform mat4 matrix;

void main() {
    vColor = color;
    gl_Position = matrix * vec4(position, 1);
}
"#;

pub(crate) const CUBE_FRAGMENT_SHADER: &str = r#"
precision mediump float;

varying vec3 vColor;

void main() {
    gl_FragColor = vec4(vColor, 1);
}
"#;

/// Translated 2D shapes in one flat colour, for the arena
pub(crate) const SHAPE_VERTEX_SHADER: &str = r#"
attribute vec2 a_position;
uniform vec2 u_translation;

void main() {
    gl_Position = vec4(a_position + u_translation, 0, 1);
}
"#;

pub(crate) const SHAPE_FRAGMENT_SHADER: &str = r#"
precision mediump float;
uniform vec4 u_color;

void main() {
    gl_FragColor = u_color;
}
"#;

/// Enum representing the type of shader.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ShaderType {
    Vertex,
    Fragment,
}

impl From<ShaderType> for u32 {
    fn from(kind: ShaderType) -> u32 {
        match kind {
            ShaderType::Vertex => GL::VERTEX_SHADER,
            ShaderType::Fragment => GL::FRAGMENT_SHADER,
        }
    }
}

#[derive(Debug)]
pub(crate) struct ShaderProgram {
    pub(crate) program: WebGlProgram,
}

impl ShaderProgram {
    pub(crate) fn link(gl: &GL, vertex_source: &str, fragment_source: &str) -> Result<Self, Error> {
        let vertex_shader = compile_shader(gl, ShaderType::Vertex, vertex_source)?;
        let fragment_shader = compile_shader(gl, ShaderType::Fragment, fragment_source)?;

        let program = gl.create_program().ok_or(Error::ShaderProgramCreationError)?;
        gl.attach_shader(&program, &vertex_shader);
        gl.attach_shader(&program, &fragment_shader);
        gl.link_program(&program);

        // shaders are no longer needed once linked, or once linking failed
        gl.delete_shader(Some(&vertex_shader));
        gl.delete_shader(Some(&fragment_shader));

        let linked = gl
            .get_program_parameter(&program, GL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false);
        if !linked {
            let log = gl.get_program_info_log(&program).unwrap_or_default();
            web_sys::console::error_1(&log.as_str().into());
            gl.delete_program(Some(&program));
            return Err(Error::ShaderLinkError(log));
        }

        Ok(Self { program })
    }

    pub(crate) fn use_program(&self, gl: &GL) {
        gl.use_program(Some(&self.program));
    }

    pub(crate) fn uniform(&self, gl: &GL, name: &'static str) -> Result<WebGlUniformLocation, Error> {
        gl.get_uniform_location(&self.program, name)
            .ok_or(Error::UniformLocationError(name))
    }

    pub(crate) fn attribute(&self, gl: &GL, name: &'static str) -> Result<u32, Error> {
        let location = gl.get_attrib_location(&self.program, name);
        u32::try_from(location).map_err(|_| Error::AttributeLocationError(name))
    }
}

pub(crate) fn compile_shader(gl: &GL, kind: ShaderType, source: &str) -> Result<WebGlShader, Error> {
    let shader = gl
        .create_shader(kind.into())
        .ok_or(Error::ShaderCreationError("failed creating shader"))?;

    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let compiled = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if !compiled {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        web_sys::console::error_1(&log.as_str().into());
        gl.delete_shader(Some(&shader));
        return Err(Error::ShaderCompileError(log));
    }

    Ok(shader)
}

pub(crate) fn create_buffer(gl: &GL) -> Result<WebGlBuffer, Error> {
    gl.create_buffer().ok_or(Error::BufferCreationError)
}

/// Replace the contents of `buffer` with `data`
pub(crate) fn upload(gl: &GL, buffer: &WebGlBuffer, data: &[f32], usage: u32) {
    let array = js_sys::Float32Array::from(data);
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(buffer));
    gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &array, usage);
}

/// Point `location` at `buffer`, `size` floats per vertex
pub(crate) fn bind_attribute(gl: &GL, buffer: &WebGlBuffer, location: u32, size: i32) {
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(buffer));
    gl.enable_vertex_attrib_array(location);
    gl.vertex_attrib_pointer_with_i32(location, size, GL::FLOAT, false, 0, 0);
}

pub(crate) fn draw_mode(primitive: Primitive) -> u32 {
    match primitive {
        Primitive::Triangles => GL::TRIANGLES,
        Primitive::TriangleStrip => GL::TRIANGLE_STRIP,
    }
}

/// Draw `count` vertices from the bound attributes
pub(crate) fn draw(gl: &GL, primitive: Primitive, count: usize) {
    gl.draw_arrays(draw_mode(primitive), 0, count as i32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_modes() {
        assert_eq!(draw_mode(Primitive::Triangles), GL::TRIANGLES);
        assert_eq!(draw_mode(Primitive::TriangleStrip), GL::TRIANGLE_STRIP);
    }

    #[test]
    fn test_shader_types() {
        assert_eq!(u32::from(ShaderType::Vertex), GL::VERTEX_SHADER);
        assert_eq!(u32::from(ShaderType::Fragment), GL::FRAGMENT_SHADER);
    }

    #[test]
    fn test_shaders_declare_their_inputs() {
        for name in ["position", "color", "matrix"] {
            assert!(CUBE_VERTEX_SHADER.contains(name));
        }
        for name in ["a_position", "u_translation"] {
            assert!(SHAPE_VERTEX_SHADER.contains(name));
        }
        assert!(SHAPE_FRAGMENT_SHADER.contains("u_color"));
    }
}
