use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as Gl, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::camera::PerspectiveCamera;
use crate::mesh::{tessellate, Mesh, VERTEX_STRIDE};
use crate::scene::{GeometryId, Scene};
use super::shaders::{MESH_VERTEX_SHADER, PHONG_FRAGMENT_SHADER};

/// (location, components, offset in floats) for each `layout(location)` input of the mesh shader
const ATTRIBUTES: [(u32, i32, i32); 2] = [(0, 3, 0), (1, 3, 3)];

fn compile_stage(gl: &Gl, kind: u32, source: &str) -> Result<WebGlShader, String> {
    let shader = gl.create_shader(kind).ok_or("Failed to create shader")?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let compiled = gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if !compiled {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        return Err(format!("Shader compilation failed: {}", log));
    }
    Ok(shader)
}

/// Compile both stages and link them; the shader objects are released either way
fn link_program(gl: &Gl, vertex: &str, fragment: &str) -> Result<WebGlProgram, String> {
    let stages = [
        compile_stage(gl, Gl::VERTEX_SHADER, vertex)?,
        compile_stage(gl, Gl::FRAGMENT_SHADER, fragment)?,
    ];
    let program = gl.create_program().ok_or("Failed to create program")?;

    for stage in &stages {
        gl.attach_shader(&program, stage);
    }
    gl.link_program(&program);
    for stage in &stages {
        gl.delete_shader(Some(stage));
    }

    let linked = gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if !linked {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        return Err(format!("Program linking failed: {}", log));
    }
    Ok(program)
}

/// Create a buffer bound to `target` and fill it with a copy of `data`
fn upload_buffer(gl: &Gl, target: u32, data: &js_sys::Object) -> Result<WebGlBuffer, String> {
    let buffer = gl.create_buffer().ok_or("Failed to create buffer")?;
    gl.bind_buffer(target, Some(&buffer));
    gl.buffer_data_with_array_buffer_view(target, data, Gl::STATIC_DRAW);
    Ok(buffer)
}

/// Cached uniform locations for the mesh shader
struct MeshUniforms {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    shininess: Option<WebGlUniformLocation>,
    camera_pos: Option<WebGlUniformLocation>,
    light_dir: Option<WebGlUniformLocation>,
    light_color: Option<WebGlUniformLocation>,
    ambient_color: Option<WebGlUniformLocation>,
}

impl MeshUniforms {
    fn locate(gl: &Gl, program: &WebGlProgram) -> Self {
        let at = |name: &str| gl.get_uniform_location(program, name);
        Self {
            model: at("u_model"),
            view: at("u_view"),
            projection: at("u_projection"),
            color: at("u_color"),
            shininess: at("u_shininess"),
            camera_pos: at("u_camera_pos"),
            light_dir: at("u_light_dir"),
            light_color: at("u_light_color"),
            ambient_color: at("u_ambient_color"),
        }
    }
}

/// Geometry uploaded once and shared by every mesh that references it
struct GpuGeometry {
    vao: WebGlVertexArrayObject,
    _vertex_buffer: WebGlBuffer,
    _index_buffer: WebGlBuffer,
    index_count: i32,
}

impl GpuGeometry {
    fn upload(gl: &Gl, mesh: &Mesh) -> Result<Self, String> {
        let vao = gl.create_vertex_array().ok_or("Failed to create VAO")?;
        gl.bind_vertex_array(Some(&vao));

        let vertices = js_sys::Float32Array::from(mesh.vertex_data().as_slice());
        let indices = js_sys::Uint32Array::from(mesh.index_data());
        let vertex_buffer = upload_buffer(gl, Gl::ARRAY_BUFFER, &vertices)?;
        // The element binding is recorded in the VAO
        let index_buffer = upload_buffer(gl, Gl::ELEMENT_ARRAY_BUFFER, &indices)?;

        let stride = (VERTEX_STRIDE * 4) as i32;
        for (location, components, offset) in ATTRIBUTES {
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_with_i32(location, components, Gl::FLOAT, false, stride, offset * 4);
        }

        gl.bind_vertex_array(None);
        gl.bind_buffer(Gl::ARRAY_BUFFER, None);

        Ok(Self {
            vao,
            _vertex_buffer: vertex_buffer,
            _index_buffer: index_buffer,
            index_count: mesh.index_data().len() as i32,
        })
    }
}

/// Draws a `Scene` into its canvas
pub struct Renderer {
    canvas: HtmlCanvasElement,
    gl: Gl,
    program: WebGlProgram,
    uniforms: MeshUniforms,
    geometries: HashMap<GeometryId, GpuGeometry>,
    pixel_ratio: f64,
    // Drawing buffer size in device pixels
    width: i32,
    height: i32,
}

impl Renderer {
    pub fn new(canvas: HtmlCanvasElement, antialias: bool) -> Result<Self, String> {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"antialias".into(), &antialias.into())
            .map_err(|e| format!("Failed to build context options: {:?}", e))?;

        let gl = canvas
            .get_context_with_context_options("webgl2", &options)
            .map_err(|e| format!("Failed to get WebGL2 context: {:?}", e))?
            .ok_or("WebGL2 is not supported")?
            .dyn_into::<Gl>()
            .map_err(|_| "Context is not a WebGL2RenderingContext".to_string())?;

        let program = link_program(&gl, MESH_VERTEX_SHADER, PHONG_FRAGMENT_SHADER)?;
        let uniforms = MeshUniforms::locate(&gl, &program);

        gl.enable(Gl::DEPTH_TEST);
        gl.enable(Gl::CULL_FACE);
        gl.cull_face(Gl::BACK);

        let width = canvas.width() as i32;
        let height = canvas.height() as i32;

        Ok(Self {
            canvas,
            gl,
            program,
            uniforms,
            geometries: HashMap::new(),
            pixel_ratio: 1.0,
            width,
            height,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = if ratio > 0.0 { ratio } else { 1.0 };
    }

    /// Resize the output to `width` x `height` CSS pixels
    pub fn set_size(&mut self, width: u32, height: u32) -> Result<(), String> {
        let buffer_width = (width as f64 * self.pixel_ratio).floor() as u32;
        let buffer_height = (height as f64 * self.pixel_ratio).floor() as u32;

        self.canvas.set_width(buffer_width);
        self.canvas.set_height(buffer_height);

        let style = self.canvas.style();
        style
            .set_property("width", &format!("{}px", width))
            .and_then(|_| style.set_property("height", &format!("{}px", height)))
            .map_err(|e| format!("Failed to style canvas: {:?}", e))?;

        self.width = buffer_width as i32;
        self.height = buffer_height as i32;
        Ok(())
    }

    /// Tessellate and upload geometry the first time a mesh uses it
    fn ensure_geometry(&mut self, scene: &Scene, id: GeometryId) -> Result<(), String> {
        if self.geometries.contains_key(&id) {
            return Ok(());
        }

        let geometry = scene
            .geometry(id)
            .ok_or_else(|| format!("Unknown geometry {:?}", id))?;
        let gpu = GpuGeometry::upload(&self.gl, &tessellate(geometry))?;
        self.geometries.insert(id, gpu);
        Ok(())
    }

    /// Render one frame
    pub fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), String> {
        for mesh in scene.meshes() {
            self.ensure_geometry(scene, mesh.geometry)?;
        }

        let gl = &self.gl;
        let u = &self.uniforms;
        let bg = scene.background;

        gl.viewport(0, 0, self.width, self.height);
        gl.clear_color(bg.r, bg.g, bg.b, 1.0);
        gl.clear(Gl::COLOR_BUFFER_BIT | Gl::DEPTH_BUFFER_BIT);
        gl.use_program(Some(&self.program));

        let lighting = scene.lighting();
        gl.uniform_matrix4fv_with_f32_array(u.view.as_ref(), false, camera.view_matrix().as_slice());
        gl.uniform_matrix4fv_with_f32_array(u.projection.as_ref(), false, camera.projection_matrix().as_slice());
        gl.uniform3fv_with_f32_array(u.camera_pos.as_ref(), &camera.position.to_array());
        gl.uniform3fv_with_f32_array(u.light_dir.as_ref(), &lighting.direction.to_array());
        gl.uniform3fv_with_f32_array(u.light_color.as_ref(), &lighting.directional.to_array());
        gl.uniform3fv_with_f32_array(u.ambient_color.as_ref(), &lighting.ambient.to_array());

        for mesh in scene.meshes() {
            let Some(gpu) = self.geometries.get(&mesh.geometry) else {
                continue;
            };

            gl.uniform_matrix4fv_with_f32_array(u.model.as_ref(), false, mesh.matrix.as_slice());
            gl.uniform3fv_with_f32_array(u.color.as_ref(), &mesh.material.color.to_array());
            gl.uniform1f(u.shininess.as_ref(), mesh.material.shininess);

            gl.bind_vertex_array(Some(&gpu.vao));
            gl.draw_elements_with_i32(Gl::TRIANGLES, gpu.index_count, Gl::UNSIGNED_INT, 0);
        }

        gl.bind_vertex_array(None);
        Ok(())
    }
}
