/// Vertex shader shared by every mesh
pub const MESH_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;

out vec3 v_world_position;
out vec3 v_normal;

void main() {
    vec4 world_pos = u_model * vec4(a_position, 1.0);

    v_world_position = world_pos.xyz;
    // Meshes only carry uniform scale, so the upper 3x3 is a valid normal matrix
    v_normal = mat3(u_model) * a_normal;

    gl_Position = u_projection * u_view * world_pos;
}
"#;

/// Blinn-Phong fragment shader: one directional light plus ambient
pub const PHONG_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_world_position;
in vec3 v_normal;

uniform vec3 u_color;
uniform float u_shininess;
uniform vec3 u_camera_pos;
uniform vec3 u_light_dir;
uniform vec3 u_light_color;
uniform vec3 u_ambient_color;

out vec4 fragColor;

void main() {
    vec3 normal = normalize(v_normal);
    vec3 view_dir = normalize(u_camera_pos - v_world_position);

    float ndotl = max(dot(normal, u_light_dir), 0.0);
    vec3 diffuse = u_color * u_light_color * ndotl;

    vec3 half_dir = normalize(u_light_dir + view_dir);
    float spec = ndotl > 0.0 ? pow(max(dot(normal, half_dir), 0.0), u_shininess) : 0.0;
    vec3 specular = u_light_color * spec * 0.1;

    vec3 ambient = u_color * u_ambient_color;

    vec3 color = ambient + diffuse + specular;

    // Gamma correction
    color = pow(color, vec3(1.0 / 2.2));

    fragColor = vec4(color, 1.0);
}
"#;
